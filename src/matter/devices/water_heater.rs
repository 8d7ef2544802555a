//! Water heater: a heating-only thermostat with hot water management and
//! water heater modes.

use super::{check_mode, check_range};
use crate::config::WaterHeaterConfig;
use crate::error::{BridgeError, Result};
use crate::matter::attributes;
use crate::matter::clusters::general::WiredCurrentType;
use crate::matter::clusters::thermostat::celsius;
use crate::matter::clusters::{
    BehaviorType, ClusterKind, PowerSourceState, ThermostatState, WaterHeaterManagementState,
    WaterHeaterModeState,
};
use crate::matter::device_types;
use crate::matter::endpoints::Endpoint;
use crate::matter::resolver::ClusterResolver;
use serde_json::json;

/// Build an unregistered water heater endpoint from `config`.
pub fn build(config: &WaterHeaterConfig, resolver: &ClusterResolver) -> Result<Endpoint> {
    check_range(
        "Water heater target temperature",
        config.target_temperature,
        config.min_temperature,
        config.max_temperature,
    )?;
    if config.tank_percentage > 100 {
        return Err(BridgeError::Config(format!(
            "Water heater tank percentage {} is above 100",
            config.tank_percentage
        )));
    }

    let thermostat = ThermostatState::heating(
        config.water_temperature,
        config.target_temperature,
        config.min_temperature,
        config.max_temperature,
    );
    let management = WaterHeaterManagementState {
        tank_percentage: config.tank_percentage,
        ..Default::default()
    };
    let mode = WaterHeaterModeState {
        current_mode: config.initial_mode,
        ..Default::default()
    };
    check_mode(ClusterKind::WaterHeaterMode, &mode)?;

    let endpoint = Endpoint::new(
        config.name.clone(),
        &[device_types::WATER_HEATER, device_types::BRIDGED_NODE],
    );
    endpoint.attach(BehaviorType::THERMOSTAT_HEATING, thermostat);
    endpoint.attach(BehaviorType::WATER_HEATER_MANAGEMENT, management);
    endpoint.attach(BehaviorType::WATER_HEATER_MODE, mode);
    endpoint.attach(
        BehaviorType::POWER_SOURCE_WIRED,
        PowerSourceState::wired(WiredCurrentType::Ac),
    );
    resolver.add_required_clusters(&endpoint);

    log::info!(
        "[Matter] Water heater {} built: {:.1} °C target in {:.1}..{:.1} °C",
        endpoint.name(),
        config.target_temperature,
        config.min_temperature,
        config.max_temperature
    );
    Ok(endpoint)
}

/// Report a measured water temperature in degrees Celsius.
///
/// Returns `true` when the stored value changed.
pub fn report_water_temperature(endpoint: &Endpoint, degrees: f32) -> bool {
    attributes::update_attribute(
        endpoint,
        ClusterKind::Thermostat,
        "localTemperature",
        json!(celsius(degrees)),
    )
}

/// Report how full the tank is with hot water.
pub fn report_tank_percentage(endpoint: &Endpoint, percent: u8) -> bool {
    attributes::update_attribute(
        endpoint,
        ClusterKind::WaterHeaterManagement,
        "tankPercentage",
        json!(percent.min(100)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::water_heater::{BoostInfo, BoostState, heat_source};
    use crate::matter::commands::testing::Recorder;
    use crate::matter::commands::water_heater::BoostRequest;
    use crate::matter::commands::{
        ChangeToMode, Command, CommandInterceptor, CommandResponse, WaterHeaterManagementCommand,
    };
    use crate::matter::endpoints::EndpointIdentity;
    use std::sync::Arc;

    fn heater() -> (Endpoint, Arc<Recorder>) {
        let endpoint = build(&WaterHeaterConfig::default(), &ClusterResolver::new()).unwrap();
        endpoint.activate(EndpointIdentity::new("heater-1", 9)).unwrap();
        let recorder = Arc::new(Recorder::default());
        endpoint.bind_device(recorder.clone(), Arc::new(())).unwrap();
        (endpoint, recorder)
    }

    fn get(endpoint: &Endpoint, cluster: ClusterKind, name: &str) -> Option<serde_json::Value> {
        attributes::get_attribute(endpoint, cluster, name)
    }

    #[test]
    fn test_defaults() {
        let (endpoint, _) = heater();
        assert_eq!(
            endpoint.cluster_ids(),
            vec![0x0003, 0x002F, 0x0039, 0x0094, 0x009E, 0x0201]
        );

        let thermostat = ClusterKind::Thermostat;
        assert_eq!(get(&endpoint, thermostat, "localTemperature"), Some(json!(5000)));
        assert_eq!(get(&endpoint, thermostat, "occupiedHeatingSetpoint"), Some(json!(5000)));
        assert_eq!(get(&endpoint, thermostat, "absMinHeatSetpointLimit"), Some(json!(2000)));
        assert_eq!(get(&endpoint, thermostat, "absMaxHeatSetpointLimit"), Some(json!(8000)));
        assert_eq!(get(&endpoint, thermostat, "occupiedCoolingSetpoint"), None);

        let management = ClusterKind::WaterHeaterManagement;
        assert_eq!(
            get(&endpoint, management, "heaterTypes"),
            Some(json!(heat_source::IMMERSION_ELEMENT_1))
        );
        assert_eq!(get(&endpoint, management, "tankPercentage"), Some(json!(90)));
        assert_eq!(
            get(&endpoint, management, "boostState"),
            Some(json!(BoostState::Inactive as u8))
        );

        let modes = get(&endpoint, ClusterKind::WaterHeaterMode, "supportedModes").unwrap();
        let labels: Vec<&str> = modes
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, ["Auto", "Quick", "Quiet", "Off", "Manual", "Timed"]);
        assert_eq!(get(&endpoint, ClusterKind::WaterHeaterMode, "currentMode"), Some(json!(1)));

        assert_eq!(
            get(&endpoint, ClusterKind::BridgedDeviceBasicInformation, "nodeLabel"),
            Some(json!("Water Heater"))
        );
    }

    #[test]
    fn test_inconsistent_config_is_rejected() {
        let resolver = ClusterResolver::new();
        let out_of_range = WaterHeaterConfig {
            target_temperature: 95.0,
            ..Default::default()
        };
        assert!(matches!(
            build(&out_of_range, &resolver),
            Err(BridgeError::Config(_))
        ));

        let unknown_mode = WaterHeaterConfig {
            initial_mode: 7,
            ..Default::default()
        };
        assert!(matches!(
            build(&unknown_mode, &resolver),
            Err(BridgeError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_boost_and_mode() {
        let (endpoint, recorder) = heater();

        CommandInterceptor::invoke(
            &endpoint,
            Command::WaterHeaterManagement(WaterHeaterManagementCommand::Boost(BoostRequest {
                boost_info: BoostInfo {
                    duration: 600,
                    ..Default::default()
                },
            })),
        )
        .await
        .unwrap();
        assert_eq!(
            get(&endpoint, ClusterKind::WaterHeaterManagement, "boostState"),
            Some(json!(BoostState::Active as u8))
        );

        CommandInterceptor::invoke(
            &endpoint,
            Command::WaterHeaterManagement(WaterHeaterManagementCommand::CancelBoost),
        )
        .await
        .unwrap();
        assert_eq!(
            get(&endpoint, ClusterKind::WaterHeaterManagement, "boostState"),
            Some(json!(BoostState::Inactive as u8))
        );

        let response = CommandInterceptor::invoke(
            &endpoint,
            Command::WaterHeaterMode(ChangeToMode { new_mode: 4 }),
        )
        .await
        .unwrap();
        assert!(matches!(response, CommandResponse::ModeChange { .. }));
        assert_eq!(get(&endpoint, ClusterKind::WaterHeaterMode, "currentMode"), Some(json!(4)));
        assert_eq!(recorder.operations(), vec!["boost", "cancelBoost", "changeToMode"]);
    }

    #[test]
    fn test_reports() {
        let (endpoint, _) = heater();
        assert!(!report_water_temperature(&endpoint, 50.0));
        assert!(report_water_temperature(&endpoint, 48.5));
        assert_eq!(
            get(&endpoint, ClusterKind::Thermostat, "localTemperature"),
            Some(json!(4850))
        );
        assert!(report_tank_percentage(&endpoint, 120));
        assert_eq!(
            get(&endpoint, ClusterKind::WaterHeaterManagement, "tankPercentage"),
            Some(json!(100))
        );
    }
}
