//! `changeToMode` for ModeSelect and the mode-base clusters.
//!
//! All four clusters validate the requested mode against `supportedModes`
//! before anything is forwarded. RvcRunMode additionally drives the
//! endpoint's RvcOperationalState from the new mode's tags.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::modes::{ModeBase, ModeChangeStatus, rvc_run_tags};
use crate::matter::clusters::operational_state::OperationalStateId;
use crate::matter::clusters::{
    ClusterKind, ClusterStateVariant, ModeSelectState, RvcCleanModeState, RvcOperationalStateState,
    RvcRunModeState, WaterHeaterModeState,
};
use crate::matter::endpoints::Endpoint;
use serde::{Deserialize, Serialize};

pub const OPERATION: &str = "changeToMode";

pub const MODE_SELECT_COMMANDS: &[CommandSpec] = &[CommandSpec::new(0x00, OPERATION)];

pub const MODE_BASE_COMMANDS: &[CommandSpec] = &[CommandSpec::new(0x00, OPERATION).responds(0x01)];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeToMode {
    pub new_mode: u8,
}

fn unsupported(mode: u8) -> CommandResponse {
    CommandResponse::ModeChange {
        status: ModeChangeStatus::UnsupportedMode,
        status_text: Some(format!("Unsupported mode: {}", mode)),
    }
}

fn success() -> CommandResponse {
    CommandResponse::ModeChange {
        status: ModeChangeStatus::Success,
        status_text: None,
    }
}

/// Validate, forward and store the new mode.
///
/// `Ok(None)` means the mode was rejected and nothing happened.
async fn change_mode<S: ClusterStateVariant + ModeBase>(
    inv: &Invocation<'_>,
    cmd: &ChangeToMode,
) -> Result<Option<u8>> {
    if !inv.read(|s: &S| s.supports_mode(cmd.new_mode))? {
        log::info!(
            "[Matter] {} rejected {} {}: unsupported",
            inv.endpoint,
            OPERATION,
            cmd.new_mode
        );
        return Ok(None);
    }
    inv.forward().await?;
    let previous = inv.mutate(|s: &mut S| {
        let previous = s.current_mode();
        s.set_current_mode(cmd.new_mode);
        previous
    })?;
    log::debug!(
        "[Matter] {} mode {} -> {}",
        inv.endpoint,
        previous,
        cmd.new_mode
    );
    Ok(Some(cmd.new_mode))
}

pub(super) async fn handle_mode_select(
    inv: &Invocation<'_>,
    cmd: ChangeToMode,
) -> Result<CommandResponse> {
    // ModeSelect has no response command; rejection still reports the status
    match change_mode::<ModeSelectState>(inv, &cmd).await? {
        Some(_) => Ok(CommandResponse::None),
        None => Ok(unsupported(cmd.new_mode)),
    }
}

pub(super) async fn handle_rvc_clean(
    inv: &Invocation<'_>,
    cmd: ChangeToMode,
) -> Result<CommandResponse> {
    match change_mode::<RvcCleanModeState>(inv, &cmd).await? {
        Some(_) => Ok(success()),
        None => Ok(unsupported(cmd.new_mode)),
    }
}

pub(super) async fn handle_water_heater(
    inv: &Invocation<'_>,
    cmd: ChangeToMode,
) -> Result<CommandResponse> {
    match change_mode::<WaterHeaterModeState>(inv, &cmd).await? {
        Some(_) => Ok(success()),
        None => Ok(unsupported(cmd.new_mode)),
    }
}

pub(super) async fn handle_rvc_run(
    inv: &Invocation<'_>,
    cmd: ChangeToMode,
) -> Result<CommandResponse> {
    let Some(mode) = change_mode::<RvcRunModeState>(inv, &cmd).await? else {
        return Ok(unsupported(cmd.new_mode));
    };
    let idle = inv.read(|s: &RvcRunModeState| {
        s.option(mode).is_some_and(|m| m.has_tag(rvc_run_tags::IDLE))
    })?;
    let target = if idle {
        OperationalStateId::Docked
    } else {
        OperationalStateId::Running
    };
    sync_operational_state(inv.endpoint, target)?;
    Ok(success())
}

/// Move the endpoint's RvcOperationalState, if it has one.
pub(super) fn sync_operational_state(
    endpoint: &Endpoint,
    target: OperationalStateId,
) -> Result<()> {
    let cluster = ClusterKind::RvcOperationalState.id();
    if !endpoint.has_cluster(cluster) {
        return Ok(());
    }
    endpoint.mutate_state(cluster, |s: &mut RvcOperationalStateState| s.transition(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::{BehaviorType, ClusterState};
    use crate::matter::commands::testing::endpoint_with;
    use crate::matter::commands::{Command, CommandInterceptor};
    use crate::matter::device_types;
    use crate::matter::endpoints::ClusterBehavior;

    #[tokio::test]
    async fn test_unsupported_mode_is_rejected_for_every_mode_cluster() {
        let cases: Vec<(BehaviorType, ClusterState, fn(ChangeToMode) -> Command)> = vec![
            (BehaviorType::MODE_SELECT, ModeSelectState::default().into(), Command::ModeSelect),
            (BehaviorType::RVC_RUN_MODE, RvcRunModeState::default().into(), Command::RvcRunMode),
            (
                BehaviorType::RVC_CLEAN_MODE,
                RvcCleanModeState::default().into(),
                Command::RvcCleanMode,
            ),
            (
                BehaviorType::WATER_HEATER_MODE,
                WaterHeaterModeState::default().into(),
                Command::WaterHeaterMode,
            ),
        ];
        for (behavior, state, command) in cases {
            let (endpoint, recorder) =
                endpoint_with(device_types::MODE_SELECT, vec![(behavior, state)]);
            let before = endpoint
                .with_behavior(behavior.id(), ClusterBehavior::attributes_json)
                .unwrap();

            let response =
                CommandInterceptor::invoke(&endpoint, command(ChangeToMode { new_mode: 99 }))
                    .await
                    .unwrap();
            assert_eq!(response, unsupported(99));
            assert!(recorder.operations().is_empty());
            assert_eq!(
                endpoint
                    .with_behavior(behavior.id(), ClusterBehavior::attributes_json)
                    .unwrap(),
                before
            );
        }
    }

    #[tokio::test]
    async fn test_water_heater_mode_change() {
        let (endpoint, recorder) = endpoint_with(
            device_types::WATER_HEATER,
            vec![(BehaviorType::WATER_HEATER_MODE, WaterHeaterModeState::default().into())],
        );
        let response = CommandInterceptor::invoke(
            &endpoint,
            Command::WaterHeaterMode(ChangeToMode { new_mode: 4 }),
        )
        .await
        .unwrap();
        assert_eq!(response, success());
        assert_eq!(
            endpoint
                .read_state::<WaterHeaterModeState, _>(0x009E, |s| s.current_mode)
                .unwrap(),
            4
        );
        assert_eq!(recorder.calls.lock()[0].1, serde_json::json!({"newMode": 4}));
    }

    #[tokio::test]
    async fn test_rvc_run_mode_drives_operational_state() {
        let (endpoint, _) = endpoint_with(
            device_types::ROBOTIC_VACUUM_CLEANER,
            vec![
                (BehaviorType::RVC_RUN_MODE, RvcRunModeState::default().into()),
                (
                    BehaviorType::RVC_OPERATIONAL_STATE,
                    RvcOperationalStateState::default().into(),
                ),
            ],
        );
        let operational = |endpoint: &Endpoint| {
            endpoint
                .read_state::<RvcOperationalStateState, _>(0x0061, |s| s.state())
                .unwrap()
        };

        CommandInterceptor::invoke(&endpoint, Command::RvcRunMode(ChangeToMode { new_mode: 2 }))
            .await
            .unwrap();
        assert_eq!(operational(&endpoint), Some(OperationalStateId::Running));

        CommandInterceptor::invoke(&endpoint, Command::RvcRunMode(ChangeToMode { new_mode: 1 }))
            .await
            .unwrap();
        assert_eq!(operational(&endpoint), Some(OperationalStateId::Docked));

        // Mapping carries neither tag
        CommandInterceptor::invoke(&endpoint, Command::RvcRunMode(ChangeToMode { new_mode: 3 }))
            .await
            .unwrap();
        assert_eq!(operational(&endpoint), Some(OperationalStateId::Running));
    }
}
