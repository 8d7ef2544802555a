//! Robotic vacuum cleaner: run mode, clean mode, operational state and
//! service areas on one endpoint.

use super::check_mode;
use crate::config::VacuumConfig;
use crate::error::{BridgeError, Result};
use crate::matter::clusters::modes::rvc_run_tags;
use crate::matter::clusters::operational_state::OperationalStateId;
use crate::matter::clusters::service_area::AreaStruct;
use crate::matter::clusters::{
    BehaviorType, ClusterKind, PowerSourceState, RvcCleanModeState, RvcOperationalStateState,
    RvcRunModeState, ServiceAreaState,
};
use crate::matter::device_types;
use crate::matter::endpoints::Endpoint;
use crate::matter::resolver::ClusterResolver;

/// Areas numbered from 1 in configuration order.
fn areas(names: &[String]) -> Result<Vec<AreaStruct>> {
    if names.is_empty() {
        return Err(BridgeError::Config("Vacuum needs at least one area".to_string()));
    }
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(BridgeError::Config(format!("Vacuum area {} has no name", i + 1)));
        }
        if names[..i].contains(name) {
            return Err(BridgeError::Config(format!("Vacuum area {} is listed twice", name)));
        }
    }
    Ok(names
        .iter()
        .zip(1u32..)
        .map(|(name, id)| AreaStruct::named(id, name.as_str()))
        .collect())
}

/// Idle run modes go with a robot that is not running, and the reverse.
fn check_coherent(run: &RvcRunModeState, operational: &RvcOperationalStateState) -> Result<()> {
    let idle = run
        .option(run.current_mode)
        .is_some_and(|option| option.has_tag(rvc_run_tags::IDLE));
    let running = operational.state() == Some(OperationalStateId::Running);
    if idle == running {
        return Err(BridgeError::Config(format!(
            "Run mode {} does not match operational state {:?}",
            run.current_mode,
            operational.state()
        )));
    }
    Ok(())
}

/// Build an unregistered, docked robot vacuum endpoint.
pub fn build(config: &VacuumConfig, resolver: &ClusterResolver) -> Result<Endpoint> {
    let service_area = ServiceAreaState::new(areas(&config.areas)?);
    let run = RvcRunModeState::default();
    let clean = RvcCleanModeState::default();
    let operational = RvcOperationalStateState::new(OperationalStateId::Docked);
    check_mode(ClusterKind::RvcRunMode, &run)?;
    check_mode(ClusterKind::RvcCleanMode, &clean)?;
    check_coherent(&run, &operational)?;

    let endpoint = Endpoint::new(
        config.name.clone(),
        &[device_types::ROBOTIC_VACUUM_CLEANER, device_types::BRIDGED_NODE],
    );
    endpoint.attach(BehaviorType::RVC_RUN_MODE, run);
    endpoint.attach(BehaviorType::RVC_CLEAN_MODE, clean);
    endpoint.attach(BehaviorType::RVC_OPERATIONAL_STATE, operational);
    endpoint.attach(BehaviorType::SERVICE_AREA, service_area);
    endpoint.attach(BehaviorType::POWER_SOURCE_BATTERY, PowerSourceState::battery(100));
    resolver.add_required_clusters(&endpoint);

    log::info!(
        "[Matter] Robot vacuum {} built with {} area(s)",
        endpoint.name(),
        config.areas.len()
    );
    Ok(endpoint)
}
