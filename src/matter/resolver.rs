//! Cluster resolution for bridged endpoints.
//!
//! Reads an endpoint's device type declarations, works out which clusters
//! are still missing, picks the concrete behavior type (feature map) for each
//! and attaches default state produced by a [`DefaultClusterFactory`].

use super::clusters::general::WiredCurrentType;
use super::clusters::{
    AirQualityState, BehaviorType, BooleanStateConfigurationState, BooleanStateState,
    BridgedDeviceBasicInformationState, ClusterKind, ClusterState, ColorControlState,
    ConcentrationMeasurementState, DoorLockState, FanControlState, IdentifyState,
    IlluminanceMeasurementState, LevelControlState, ModeSelectState, OccupancySensingState,
    OnOffState, OperationalStateState, PowerSourceState, RelativeHumidityMeasurementState,
    RvcCleanModeState, RvcOperationalStateState, RvcRunModeState, ServiceAreaState,
    SmokeCoAlarmState, TemperatureMeasurementState, ThermostatState, ValveState,
    WaterHeaterManagementState, WaterHeaterModeState, WindowCoveringState,
};
use super::endpoints::Endpoint;
use rs_matter::dm::ClusterId;
use std::sync::Arc;

/// Endpoint-level values default cluster servers are seeded from.
#[derive(Clone, Debug)]
pub struct EndpointDefaults {
    pub node_label: String,
    pub serial_number: String,
    pub vendor_id: u16,
    pub vendor_name: String,
}

impl EndpointDefaults {
    pub fn for_endpoint(endpoint: &Endpoint) -> Self {
        let serial_number = endpoint
            .identity()
            .map(|identity| identity.id)
            .unwrap_or_else(|| endpoint.name().to_string());
        Self {
            node_label: endpoint.name().to_string(),
            serial_number,
            ..Self::default()
        }
    }
}

impl Default for EndpointDefaults {
    fn default() -> Self {
        let info = BridgedDeviceBasicInformationState::default();
        Self {
            node_label: info.node_label,
            serial_number: info.serial_number,
            vendor_id: info.vendor_id,
            vendor_name: info.vendor_name,
        }
    }
}

/// Produces the initial state of a cluster server.
pub trait DefaultClusterFactory: Send + Sync {
    fn create_default(&self, behavior: BehaviorType, defaults: &EndpointDefaults) -> ClusterState;
}

/// Stock defaults for every cluster kind the bridge serves.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultClusterServers;

impl DefaultClusterFactory for DefaultClusterServers {
    fn create_default(&self, behavior: BehaviorType, defaults: &EndpointDefaults) -> ClusterState {
        match behavior.kind {
            ClusterKind::Identify => IdentifyState::default().into(),
            ClusterKind::OnOff => OnOffState::default().into(),
            ClusterKind::LevelControl => LevelControlState::default().into(),
            ClusterKind::PowerSource => PowerSourceState::wired(WiredCurrentType::Ac).into(),
            ClusterKind::BridgedDeviceBasicInformation => {
                BridgedDeviceBasicInformationState::new(
                    defaults.node_label.clone(),
                    defaults.serial_number.clone(),
                )
                .with_vendor(defaults.vendor_id, defaults.vendor_name.clone())
                .into()
            }
            ClusterKind::BooleanState => BooleanStateState::default().into(),
            ClusterKind::ModeSelect => ModeSelectState::default().into(),
            ClusterKind::RvcRunMode => RvcRunModeState::default().into(),
            ClusterKind::RvcCleanMode => RvcCleanModeState::default().into(),
            ClusterKind::AirQuality => AirQualityState::default().into(),
            ClusterKind::SmokeCoAlarm => SmokeCoAlarmState::default().into(),
            ClusterKind::OperationalState => OperationalStateState::default().into(),
            ClusterKind::RvcOperationalState => RvcOperationalStateState::default().into(),
            ClusterKind::BooleanStateConfiguration => {
                BooleanStateConfigurationState::default().into()
            }
            ClusterKind::ValveConfigurationAndControl => ValveState::default().into(),
            ClusterKind::WaterHeaterManagement => WaterHeaterManagementState::default().into(),
            ClusterKind::WaterHeaterMode => WaterHeaterModeState::default().into(),
            ClusterKind::DoorLock => DoorLockState::default().into(),
            ClusterKind::WindowCovering => WindowCoveringState::default().into(),
            ClusterKind::ServiceArea => ServiceAreaState::default().into(),
            ClusterKind::Thermostat => ThermostatState::default().into(),
            ClusterKind::FanControl => FanControlState::default().into(),
            ClusterKind::ColorControl => ColorControlState::default().into(),
            ClusterKind::IlluminanceMeasurement => IlluminanceMeasurementState::default().into(),
            ClusterKind::TemperatureMeasurement => TemperatureMeasurementState::default().into(),
            ClusterKind::RelativeHumidityMeasurement => {
                RelativeHumidityMeasurementState::default().into()
            }
            ClusterKind::OccupancySensing => OccupancySensingState::default().into(),
            // Concentration measurement family
            _ => ConcentrationMeasurementState::default().into(),
        }
    }
}

/// Default behavior type for a cluster id; unknown ids fall back to Identify.
pub fn map_to_behavior_type(cluster: ClusterId) -> BehaviorType {
    let Some(kind) = ClusterKind::from_id(cluster) else {
        log::error!(
            "[Matter] No behavior for cluster 0x{:04X}, falling back to Identify",
            cluster
        );
        return BehaviorType::IDENTIFY;
    };
    match kind {
        ClusterKind::OnOff => BehaviorType::ON_OFF,
        ClusterKind::LevelControl => BehaviorType::LEVEL_CONTROL_ON_OFF,
        ClusterKind::ColorControl => BehaviorType::COLOR_CONTROL_HS_XY_CT,
        ClusterKind::WindowCovering => BehaviorType::WINDOW_COVERING_LIFT,
        ClusterKind::FanControl => BehaviorType::FAN_CONTROL_MULTI_SPEED_AUTO_STEP,
        ClusterKind::Thermostat => BehaviorType::THERMOSTAT_AUTO,
        ClusterKind::ValveConfigurationAndControl => BehaviorType::VALVE_LEVEL,
        ClusterKind::PowerSource => BehaviorType::POWER_SOURCE_WIRED,
        ClusterKind::OccupancySensing => BehaviorType::OCCUPANCY_SENSING_PIR,
        ClusterKind::AirQuality => BehaviorType::AIR_QUALITY,
        ClusterKind::BooleanStateConfiguration => BehaviorType::BOOLEAN_STATE_CONFIGURATION,
        ClusterKind::SmokeCoAlarm => BehaviorType::SMOKE_CO_ALARM,
        ClusterKind::WaterHeaterManagement => BehaviorType::WATER_HEATER_MANAGEMENT,
        kind if kind.is_concentration() => BehaviorType::concentration(kind),
        kind => BehaviorType::plain(kind),
    }
}

/// Computes and attaches the clusters an endpoint's device types call for.
pub struct ClusterResolver {
    factory: Arc<dyn DefaultClusterFactory>,
    vendor: Option<(u16, String)>,
}

impl Default for ClusterResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterResolver {
    pub fn new() -> Self {
        Self::with_factory(Arc::new(DefaultClusterServers))
    }

    pub fn with_factory(factory: Arc<dyn DefaultClusterFactory>) -> Self {
        Self {
            factory,
            vendor: None,
        }
    }

    /// Vendor reported by every BridgedDeviceBasicInformation this resolver attaches.
    pub fn with_vendor(mut self, vendor_id: u16, vendor_name: impl Into<String>) -> Self {
        self.vendor = Some((vendor_id, vendor_name.into()));
        self
    }

    /// Required clusters of every device type not attached yet, in
    /// declaration order.
    pub fn resolve_required(&self, endpoint: &Endpoint) -> Vec<ClusterId> {
        Self::missing(endpoint, |decl| decl.required)
    }

    /// Optional clusters of every device type not attached yet, in
    /// declaration order.
    pub fn resolve_optional(&self, endpoint: &Endpoint) -> Vec<ClusterId> {
        Self::missing(endpoint, |decl| decl.optional)
    }

    fn missing(
        endpoint: &Endpoint,
        clusters: impl Fn(&super::device_types::DeviceTypeDeclaration) -> &'static [ClusterId],
    ) -> Vec<ClusterId> {
        let mut ids = Vec::new();
        for decl in endpoint.device_types() {
            for &id in clusters(decl) {
                if ids.contains(&id) || endpoint.has_cluster(id) {
                    continue;
                }
                // Unknown ids are served by the Identify fallback
                if ClusterKind::from_id(id).is_none()
                    && endpoint.has_cluster(ClusterKind::Identify.id())
                {
                    continue;
                }
                ids.push(id);
            }
        }
        ids
    }

    pub fn map_to_behavior_type(&self, cluster: ClusterId) -> BehaviorType {
        map_to_behavior_type(cluster)
    }

    fn defaults_for(&self, endpoint: &Endpoint) -> EndpointDefaults {
        let mut defaults = EndpointDefaults::for_endpoint(endpoint);
        if let Some((vendor_id, vendor_name)) = &self.vendor {
            defaults.vendor_id = *vendor_id;
            defaults.vendor_name = vendor_name.clone();
        }
        defaults
    }

    /// Attach default servers for every id in `clusters` that is not present.
    ///
    /// Returns how many behaviors were attached.
    pub fn attach_defaults(&self, endpoint: &Endpoint, clusters: &[ClusterId]) -> usize {
        let defaults = self.defaults_for(endpoint);
        let mut attached = 0;
        for &id in clusters {
            if endpoint.has_cluster(id) {
                continue;
            }
            let behavior = map_to_behavior_type(id);
            if behavior.id() != id && endpoint.has_cluster(behavior.id()) {
                // Unknown id fell back to an already attached cluster
                continue;
            }
            let state = self.factory.create_default(behavior, &defaults);
            if endpoint.attach(behavior, state) {
                attached += 1;
            }
        }
        if attached > 0 {
            log::info!(
                "[Matter] Endpoint {}: attached {} default cluster(s)",
                endpoint,
                attached
            );
        }
        attached
    }

    pub fn add_required_clusters(&self, endpoint: &Endpoint) -> usize {
        let ids = self.resolve_required(endpoint);
        self.attach_defaults(endpoint, &ids)
    }

    pub fn add_optional_clusters(&self, endpoint: &Endpoint) -> usize {
        let ids = self.resolve_optional(endpoint);
        self.attach_defaults(endpoint, &ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::device_types;

    #[test]
    fn test_required_clusters_attach_once() {
        let endpoint = Endpoint::new("kitchen-light", &[device_types::DIMMABLE_LIGHT]);
        let resolver = ClusterResolver::new();

        assert_eq!(resolver.resolve_required(&endpoint), vec![0x0003, 0x0006, 0x0008]);
        assert_eq!(resolver.add_required_clusters(&endpoint), 3);
        assert_eq!(resolver.add_required_clusters(&endpoint), 0);
        assert!(resolver.resolve_required(&endpoint).is_empty());
        assert_eq!(endpoint.cluster_ids(), vec![0x0003, 0x0006, 0x0008]);
    }

    const CUSTOM: device_types::DeviceTypeDeclaration = device_types::DeviceTypeDeclaration {
        device_type: rs_matter::dm::DeviceType {
            dtype: 0xFFF0,
            drev: 1,
        },
        name: "Custom",
        required: &[0x0003, 0xFC00],
        optional: &[],
    };

    #[test]
    fn test_unknown_cluster_resolved_once_through_fallback() {
        let endpoint = Endpoint::new("custom", &[CUSTOM]);
        let resolver = ClusterResolver::new();

        assert_eq!(resolver.resolve_required(&endpoint), vec![0x0003, 0xFC00]);
        assert_eq!(resolver.add_required_clusters(&endpoint), 1);
        assert_eq!(endpoint.cluster_ids(), vec![0x0003]);
        assert!(resolver.resolve_required(&endpoint).is_empty());
        assert_eq!(resolver.add_required_clusters(&endpoint), 0);
    }

    #[test]
    fn test_resolution_dedupes_across_device_types() {
        let endpoint = Endpoint::new(
            "combo",
            &[
                device_types::WATER_HEATER,
                device_types::ON_OFF_LIGHT,
                device_types::BRIDGED_NODE,
            ],
        );
        let required = ClusterResolver::new().resolve_required(&endpoint);
        assert_eq!(
            required.iter().filter(|id| **id == ClusterKind::Identify.id()).count(),
            1
        );
        assert!(required.contains(&ClusterKind::BridgedDeviceBasicInformation.id()));
    }

    #[test]
    fn test_map_to_behavior_type() {
        assert_eq!(map_to_behavior_type(0x0201), BehaviorType::THERMOSTAT_AUTO);
        assert_eq!(
            map_to_behavior_type(0x042A),
            BehaviorType::concentration(ClusterKind::Pm25ConcentrationMeasurement)
        );
        assert_eq!(map_to_behavior_type(0x0101), BehaviorType::DOOR_LOCK);
        assert_eq!(map_to_behavior_type(0xFC00), BehaviorType::IDENTIFY);
    }

    #[test]
    fn test_vendor_flows_into_basic_information() {
        let endpoint = Endpoint::new("vacuum", &[device_types::BRIDGED_NODE]);
        ClusterResolver::new()
            .with_vendor(0x1234, "Acme")
            .add_required_clusters(&endpoint);
        let (vendor_id, vendor_name, label) = endpoint
            .read_state::<BridgedDeviceBasicInformationState, _>(0x0039, |s| {
                (s.vendor_id, s.vendor_name.clone(), s.node_label.clone())
            })
            .unwrap();
        assert_eq!(vendor_id, 0x1234);
        assert_eq!(vendor_name, "Acme");
        assert_eq!(label, "vacuum");
    }
}
