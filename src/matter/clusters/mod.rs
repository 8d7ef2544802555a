//! Typed cluster state for every cluster the bridge can expose.
//!
//! Each cluster declares its attributes once through [`cluster_state!`], which
//! generates:
//! - an attribute enum carrying the Matter attribute ids (`#[repr(u32)]`),
//! - the wire-format (lower camel case) attribute names,
//! - feature gating per attribute,
//! - a serde-backed state struct with [`AttributeAccess`] implemented by
//!   exhaustive match.
//!
//! [`ClusterState`] is the tagged union of all state structs. It preserves the
//! name-based external contract (`attributeName` → value) while keeping all
//! internal access type-checked.

use crate::error::{BridgeError, Result};
use rs_matter::dm::{AttrId, ClusterId};
use std::fmt;

/// Dynamic attribute value as seen by the name-based bridge API.
///
/// Booleans, integers, strings, structures, lists and null all map onto JSON
/// values; typed state is converted with serde on the way in and out.
pub type AttributeValue = serde_json::Value;

/// Matter command id.
pub type CommandId = u32;

/// Generates an attribute enum and its state struct.
///
/// ```ignore
/// cluster_state! {
///     pub struct OnOffState(OnOffAttribute) {
///         0x0000 => OnOff("onOff") on_off: bool,
///         0x4000 => GlobalSceneControl("globalSceneControl") global_scene_control: bool
///             where features::LIGHTING,
///     }
/// }
/// ```
macro_rules! cluster_state {
    (
        $(#[$meta:meta])*
        pub struct $state:ident ($attr:ident) {
            $(
                $(#[$fmeta:meta])*
                $id:literal => $variant:ident($name:literal) $field:ident : $ty:ty $(where $feat:expr)?
            ),* $(,)?
        }
    ) => {
        /// Attribute ids of the cluster.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, strum::FromRepr)]
        #[repr(u32)]
        pub enum $attr {
            $( $variant = $id, )*
        }

        impl $crate::matter::clusters::ClusterAttribute for $attr {
            const ALL: &'static [Self] = &[$( Self::$variant, )*];

            fn id(self) -> rs_matter::dm::AttrId {
                self as rs_matter::dm::AttrId
            }

            fn from_id(id: rs_matter::dm::AttrId) -> Option<Self> {
                Self::from_repr(id)
            }

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            fn enabled(self, feature_map: u32) -> bool {
                let _ = feature_map;
                match self {
                    $( Self::$variant => true $( && (feature_map & ($feat)) != 0 )?, )*
                }
            }
        }

        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $state {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::matter::clusters::AttributeAccess for $state {
            type Attribute = $attr;

            fn read(&self, attr: $attr) -> $crate::matter::clusters::AttributeValue {
                match attr {
                    $( $attr::$variant => serde_json::to_value(&self.$field).unwrap_or_default(), )*
                }
            }

            fn write(
                &mut self,
                attr: $attr,
                value: $crate::matter::clusters::AttributeValue,
            ) -> $crate::error::Result<()> {
                match attr {
                    $(
                        $attr::$variant => {
                            self.$field = serde_json::from_value(value).map_err(|e| {
                                $crate::error::BridgeError::InvalidValue {
                                    attribute: $name.to_string(),
                                    reason: e.to_string(),
                                }
                            })?;
                        }
                    )*
                }
                Ok(())
            }
        }
    };
}

pub mod boolean_state;
pub mod color_control;
pub mod door_lock;
pub mod fan_control;
pub mod general;
pub mod level_control;
pub mod measurement;
pub mod modes;
pub mod on_off;
pub mod operational_state;
pub mod service_area;
pub mod smoke_co_alarm;
pub mod thermostat;
pub mod valve;
pub mod water_heater;
pub mod window_covering;

pub use boolean_state::{BooleanStateConfigurationState, BooleanStateState};
pub use color_control::ColorControlState;
pub use door_lock::DoorLockState;
pub use fan_control::FanControlState;
pub use general::{BridgedDeviceBasicInformationState, IdentifyState, PowerSourceState};
pub use level_control::LevelControlState;
pub use measurement::{
    AirQualityState, ConcentrationMeasurementState, IlluminanceMeasurementState,
    OccupancySensingState, RelativeHumidityMeasurementState, TemperatureMeasurementState,
};
pub use modes::{ModeSelectState, RvcCleanModeState, RvcRunModeState, WaterHeaterModeState};
pub use on_off::OnOffState;
pub use operational_state::{OperationalStateState, RvcOperationalStateState};
pub use service_area::ServiceAreaState;
pub use smoke_co_alarm::SmokeCoAlarmState;
pub use thermostat::ThermostatState;
pub use valve::ValveState;
pub use water_heater::WaterHeaterManagementState;
pub use window_covering::WindowCoveringState;

/// An attribute enum generated by [`cluster_state!`].
pub trait ClusterAttribute: Copy + fmt::Debug + Eq + 'static {
    /// Every attribute of the cluster, in id order.
    const ALL: &'static [Self];

    fn id(self) -> AttrId;

    fn from_id(id: AttrId) -> Option<Self>;

    /// Wire-format (lower camel case) name.
    fn name(self) -> &'static str;

    /// Whether the attribute is part of the schema for `feature_map`.
    fn enabled(self, feature_map: u32) -> bool;

    fn from_name(name: &str, feature_map: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.name() == name && attr.enabled(feature_map))
    }
}

/// Typed read/write access to a cluster's state by attribute.
pub trait AttributeAccess {
    type Attribute: ClusterAttribute;

    fn read(&self, attr: Self::Attribute) -> AttributeValue;

    fn write(&mut self, attr: Self::Attribute, value: AttributeValue) -> Result<()>;

    /// Read an attribute by wire name, honoring the feature map.
    fn get_by_name(&self, name: &str, feature_map: u32) -> Option<AttributeValue> {
        Self::Attribute::from_name(name, feature_map).map(|attr| self.read(attr))
    }

    /// Write an attribute by wire name, honoring the feature map.
    fn set_by_name(&mut self, name: &str, value: AttributeValue, feature_map: u32) -> Result<()> {
        let attr = Self::Attribute::from_name(name, feature_map).ok_or_else(|| {
            BridgeError::AttributeNotFound {
                cluster: std::any::type_name::<Self>().to_string(),
                attribute: name.to_string(),
            }
        })?;
        self.write(attr, value)
    }
}

/// Downcast from [`ClusterState`] to a concrete state struct.
pub trait ClusterStateVariant: AttributeAccess + Sized {
    fn from_state(state: &ClusterState) -> Option<&Self>;

    fn from_state_mut(state: &mut ClusterState) -> Option<&mut Self>;
}

fn lookup<S: AttributeAccess>(name: &str, feature_map: u32) -> Option<AttrId> {
    S::Attribute::from_name(name, feature_map).map(ClusterAttribute::id)
}

fn present<S: AttributeAccess>(feature_map: u32) -> Vec<S::Attribute> {
    S::Attribute::ALL
        .iter()
        .copied()
        .filter(|attr| attr.enabled(feature_map))
        .collect()
}

fn read_by_id<S: AttributeAccess>(
    state: &S,
    id: AttrId,
    feature_map: u32,
) -> Option<AttributeValue> {
    S::Attribute::from_id(id)
        .filter(|attr| attr.enabled(feature_map))
        .map(|attr| state.read(attr))
}

fn write_by_id<S: AttributeAccess>(
    state: &mut S,
    id: AttrId,
    value: AttributeValue,
    feature_map: u32,
) -> Result<()> {
    let attr = S::Attribute::from_id(id)
        .filter(|attr| attr.enabled(feature_map))
        .ok_or(BridgeError::UnknownAttributeId(id))?;
    state.write(attr, value)
}

fn snapshot_of<S: AttributeAccess>(
    state: &S,
    feature_map: u32,
) -> Vec<(AttrId, &'static str, AttributeValue)> {
    present::<S>(feature_map)
        .into_iter()
        .map(|attr| (attr.id(), attr.name(), state.read(attr)))
        .collect()
}

macro_rules! cluster_states {
    ( $( $variant:ident($state:ty) ),* $(,)? ) => {
        /// State of one attached cluster behavior.
        #[derive(Clone, Debug, PartialEq)]
        pub enum ClusterState {
            $( $variant($state), )*
        }

        impl ClusterState {
            /// Resolve a wire-format attribute name to its id.
            pub fn attribute_id(&self, name: &str, feature_map: u32) -> Option<AttrId> {
                match self {
                    $( Self::$variant(_) => lookup::<$state>(name, feature_map), )*
                }
            }

            /// Ids of every attribute in the schema for `feature_map`.
            pub fn attribute_ids(&self, feature_map: u32) -> Vec<AttrId> {
                match self {
                    $(
                        Self::$variant(_) => present::<$state>(feature_map)
                            .into_iter()
                            .map(ClusterAttribute::id)
                            .collect(),
                    )*
                }
            }

            pub fn attribute_name(&self, id: AttrId) -> Option<&'static str> {
                match self {
                    $(
                        Self::$variant(_) => <$state as AttributeAccess>::Attribute::from_id(id)
                            .map(ClusterAttribute::name),
                    )*
                }
            }

            pub fn read(&self, id: AttrId, feature_map: u32) -> Option<AttributeValue> {
                match self {
                    $( Self::$variant(state) => read_by_id(state, id, feature_map), )*
                }
            }

            pub fn write(&mut self, id: AttrId, value: AttributeValue, feature_map: u32) -> Result<()> {
                match self {
                    $( Self::$variant(state) => write_by_id(state, id, value, feature_map), )*
                }
            }

            /// `(id, name, value)` for every attribute in the schema.
            pub fn snapshot(&self, feature_map: u32) -> Vec<(AttrId, &'static str, AttributeValue)> {
                match self {
                    $( Self::$variant(state) => snapshot_of(state, feature_map), )*
                }
            }
        }

        $(
            impl From<$state> for ClusterState {
                fn from(state: $state) -> Self {
                    Self::$variant(state)
                }
            }

            impl ClusterStateVariant for $state {
                fn from_state(state: &ClusterState) -> Option<&Self> {
                    match state {
                        ClusterState::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_state_mut(state: &mut ClusterState) -> Option<&mut Self> {
                    match state {
                        ClusterState::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

cluster_states! {
    Identify(IdentifyState),
    OnOff(OnOffState),
    LevelControl(LevelControlState),
    PowerSource(PowerSourceState),
    BridgedDeviceBasicInformation(BridgedDeviceBasicInformationState),
    BooleanState(BooleanStateState),
    ModeSelect(ModeSelectState),
    RvcRunMode(RvcRunModeState),
    RvcCleanMode(RvcCleanModeState),
    AirQuality(AirQualityState),
    SmokeCoAlarm(SmokeCoAlarmState),
    OperationalState(OperationalStateState),
    RvcOperationalState(RvcOperationalStateState),
    BooleanStateConfiguration(BooleanStateConfigurationState),
    Valve(ValveState),
    WaterHeaterManagement(WaterHeaterManagementState),
    WaterHeaterMode(WaterHeaterModeState),
    DoorLock(DoorLockState),
    WindowCovering(WindowCoveringState),
    ServiceArea(ServiceAreaState),
    Thermostat(ThermostatState),
    FanControl(FanControlState),
    ColorControl(ColorControlState),
    IlluminanceMeasurement(IlluminanceMeasurementState),
    TemperatureMeasurement(TemperatureMeasurementState),
    RelativeHumidityMeasurement(RelativeHumidityMeasurementState),
    OccupancySensing(OccupancySensingState),
    ConcentrationMeasurement(ConcentrationMeasurementState),
}

macro_rules! cluster_kinds {
    ( $( $variant:ident = $id:literal, $name:literal, rev $rev:literal; )* ) => {
        /// Every cluster the bridge knows how to serve.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum ClusterKind {
            $( $variant, )*
        }

        impl ClusterKind {
            pub const ALL: &'static [ClusterKind] = &[$( Self::$variant, )*];

            /// Matter cluster id.
            pub const fn id(self) -> ClusterId {
                match self {
                    $( Self::$variant => $id, )*
                }
            }

            /// Matter cluster name, e.g. `OnOff`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            /// Cluster revision reported in `clusterRevision`.
            pub const fn revision(self) -> u16 {
                match self {
                    $( Self::$variant => $rev, )*
                }
            }
        }
    };
}

cluster_kinds! {
    Identify = 0x0003, "Identify", rev 5;
    OnOff = 0x0006, "OnOff", rev 6;
    LevelControl = 0x0008, "LevelControl", rev 6;
    PowerSource = 0x002F, "PowerSource", rev 3;
    BridgedDeviceBasicInformation = 0x0039, "BridgedDeviceBasicInformation", rev 4;
    BooleanState = 0x0045, "BooleanState", rev 1;
    ModeSelect = 0x0050, "ModeSelect", rev 2;
    RvcRunMode = 0x0054, "RvcRunMode", rev 3;
    RvcCleanMode = 0x0055, "RvcCleanMode", rev 3;
    AirQuality = 0x005B, "AirQuality", rev 1;
    SmokeCoAlarm = 0x005C, "SmokeCoAlarm", rev 1;
    OperationalState = 0x0060, "OperationalState", rev 2;
    RvcOperationalState = 0x0061, "RvcOperationalState", rev 2;
    BooleanStateConfiguration = 0x0080, "BooleanStateConfiguration", rev 1;
    ValveConfigurationAndControl = 0x0081, "ValveConfigurationAndControl", rev 1;
    WaterHeaterManagement = 0x0094, "WaterHeaterManagement", rev 2;
    WaterHeaterMode = 0x009E, "WaterHeaterMode", rev 1;
    DoorLock = 0x0101, "DoorLock", rev 7;
    WindowCovering = 0x0102, "WindowCovering", rev 5;
    ServiceArea = 0x0150, "ServiceArea", rev 1;
    Thermostat = 0x0201, "Thermostat", rev 7;
    FanControl = 0x0202, "FanControl", rev 4;
    ColorControl = 0x0300, "ColorControl", rev 7;
    IlluminanceMeasurement = 0x0400, "IlluminanceMeasurement", rev 3;
    TemperatureMeasurement = 0x0402, "TemperatureMeasurement", rev 4;
    RelativeHumidityMeasurement = 0x0405, "RelativeHumidityMeasurement", rev 3;
    OccupancySensing = 0x0406, "OccupancySensing", rev 5;
    CarbonMonoxideConcentrationMeasurement = 0x040C, "CarbonMonoxideConcentrationMeasurement", rev 3;
    CarbonDioxideConcentrationMeasurement = 0x040D, "CarbonDioxideConcentrationMeasurement", rev 3;
    NitrogenDioxideConcentrationMeasurement = 0x0413, "NitrogenDioxideConcentrationMeasurement", rev 3;
    OzoneConcentrationMeasurement = 0x0415, "OzoneConcentrationMeasurement", rev 3;
    Pm25ConcentrationMeasurement = 0x042A, "Pm25ConcentrationMeasurement", rev 3;
    FormaldehydeConcentrationMeasurement = 0x042B, "FormaldehydeConcentrationMeasurement", rev 3;
    Pm1ConcentrationMeasurement = 0x042C, "Pm1ConcentrationMeasurement", rev 3;
    Pm10ConcentrationMeasurement = 0x042D, "Pm10ConcentrationMeasurement", rev 3;
    TotalVolatileOrganicCompoundsConcentrationMeasurement = 0x042E, "TotalVolatileOrganicCompoundsConcentrationMeasurement", rev 3;
    RadonConcentrationMeasurement = 0x042F, "RadonConcentrationMeasurement", rev 3;
}

impl ClusterKind {
    pub fn from_id(id: ClusterId) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.id() == id)
    }

    /// Case-insensitive lookup, so both `OnOff` and `onOff` resolve.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Member of the concentration-measurement family.
    pub const fn is_concentration(self) -> bool {
        matches!(
            self,
            Self::CarbonMonoxideConcentrationMeasurement
                | Self::CarbonDioxideConcentrationMeasurement
                | Self::NitrogenDioxideConcentrationMeasurement
                | Self::OzoneConcentrationMeasurement
                | Self::Pm25ConcentrationMeasurement
                | Self::FormaldehydeConcentrationMeasurement
                | Self::Pm1ConcentrationMeasurement
                | Self::Pm10ConcentrationMeasurement
                | Self::TotalVolatileOrganicCompoundsConcentrationMeasurement
                | Self::RadonConcentrationMeasurement
        )
    }
}

impl fmt::Display for ClusterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete behavior type: a cluster plus the feature map it is served with.
///
/// Feature combinations are named constants rather than runtime composition,
/// e.g. [`BehaviorType::FAN_CONTROL_MULTI_SPEED_AUTO_STEP`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BehaviorType {
    pub kind: ClusterKind,
    pub feature_map: u32,
}

impl BehaviorType {
    pub const fn new(kind: ClusterKind, feature_map: u32) -> Self {
        Self { kind, feature_map }
    }

    pub const fn plain(kind: ClusterKind) -> Self {
        Self::new(kind, 0)
    }

    pub const fn id(&self) -> ClusterId {
        self.kind.id()
    }

    pub const fn has_feature(&self, feature: u32) -> bool {
        self.feature_map & feature != 0
    }

    pub const IDENTIFY: Self = Self::plain(ClusterKind::Identify);
    pub const ON_OFF: Self = Self::plain(ClusterKind::OnOff);
    pub const ON_OFF_LIGHTING: Self = Self::new(ClusterKind::OnOff, on_off::features::LIGHTING);
    pub const LEVEL_CONTROL_ON_OFF: Self =
        Self::new(ClusterKind::LevelControl, level_control::features::ON_OFF);
    pub const LEVEL_CONTROL_LIGHTING: Self = Self::new(
        ClusterKind::LevelControl,
        level_control::features::ON_OFF | level_control::features::LIGHTING,
    );
    pub const COLOR_CONTROL_HS_XY_CT: Self = Self::new(
        ClusterKind::ColorControl,
        color_control::features::HUE_SATURATION
            | color_control::features::XY
            | color_control::features::COLOR_TEMPERATURE,
    );
    pub const COLOR_CONTROL_CT: Self = Self::new(
        ClusterKind::ColorControl,
        color_control::features::COLOR_TEMPERATURE,
    );
    pub const WINDOW_COVERING_LIFT: Self = Self::new(
        ClusterKind::WindowCovering,
        window_covering::features::LIFT | window_covering::features::POSITION_AWARE_LIFT,
    );
    pub const WINDOW_COVERING_LIFT_TILT: Self = Self::new(
        ClusterKind::WindowCovering,
        window_covering::features::LIFT
            | window_covering::features::POSITION_AWARE_LIFT
            | window_covering::features::TILT
            | window_covering::features::POSITION_AWARE_TILT,
    );
    pub const DOOR_LOCK: Self = Self::plain(ClusterKind::DoorLock);
    pub const FAN_CONTROL_MULTI_SPEED_AUTO_STEP: Self = Self::new(
        ClusterKind::FanControl,
        fan_control::features::MULTI_SPEED
            | fan_control::features::AUTO
            | fan_control::features::STEP,
    );
    pub const FAN_CONTROL_STEP: Self =
        Self::new(ClusterKind::FanControl, fan_control::features::STEP);
    pub const THERMOSTAT_HEATING: Self =
        Self::new(ClusterKind::Thermostat, thermostat::features::HEATING);
    pub const THERMOSTAT_COOLING: Self =
        Self::new(ClusterKind::Thermostat, thermostat::features::COOLING);
    pub const THERMOSTAT_AUTO: Self = Self::new(
        ClusterKind::Thermostat,
        thermostat::features::HEATING
            | thermostat::features::COOLING
            | thermostat::features::AUTO_MODE,
    );
    pub const VALVE: Self = Self::plain(ClusterKind::ValveConfigurationAndControl);
    pub const VALVE_LEVEL: Self = Self::new(
        ClusterKind::ValveConfigurationAndControl,
        valve::features::LEVEL,
    );
    pub const MODE_SELECT: Self = Self::plain(ClusterKind::ModeSelect);
    pub const RVC_RUN_MODE: Self = Self::plain(ClusterKind::RvcRunMode);
    pub const RVC_CLEAN_MODE: Self = Self::plain(ClusterKind::RvcCleanMode);
    pub const RVC_OPERATIONAL_STATE: Self = Self::plain(ClusterKind::RvcOperationalState);
    pub const OPERATIONAL_STATE: Self = Self::plain(ClusterKind::OperationalState);
    pub const SERVICE_AREA: Self = Self::plain(ClusterKind::ServiceArea);
    pub const SERVICE_AREA_MAPS: Self =
        Self::new(ClusterKind::ServiceArea, service_area::features::MAPS);
    pub const BOOLEAN_STATE: Self = Self::plain(ClusterKind::BooleanState);
    pub const BOOLEAN_STATE_CONFIGURATION: Self = Self::new(
        ClusterKind::BooleanStateConfiguration,
        boolean_state::features::VISUAL
            | boolean_state::features::AUDIBLE
            | boolean_state::features::ALARM_SUPPRESS
            | boolean_state::features::SENSITIVITY_LEVEL,
    );
    pub const SMOKE_CO_ALARM: Self = Self::new(
        ClusterKind::SmokeCoAlarm,
        smoke_co_alarm::features::SMOKE_ALARM | smoke_co_alarm::features::CO_ALARM,
    );
    pub const WATER_HEATER_MANAGEMENT: Self = Self::new(
        ClusterKind::WaterHeaterManagement,
        water_heater::features::ENERGY_MANAGEMENT | water_heater::features::TANK_PERCENT,
    );
    pub const WATER_HEATER_MODE: Self = Self::plain(ClusterKind::WaterHeaterMode);
    pub const POWER_SOURCE_WIRED: Self =
        Self::new(ClusterKind::PowerSource, general::power_source_features::WIRED);
    pub const POWER_SOURCE_BATTERY: Self = Self::new(
        ClusterKind::PowerSource,
        general::power_source_features::BATTERY | general::power_source_features::REPLACEABLE,
    );
    pub const BRIDGED_DEVICE_BASIC_INFORMATION: Self =
        Self::plain(ClusterKind::BridgedDeviceBasicInformation);
    pub const TEMPERATURE_MEASUREMENT: Self = Self::plain(ClusterKind::TemperatureMeasurement);
    pub const RELATIVE_HUMIDITY_MEASUREMENT: Self =
        Self::plain(ClusterKind::RelativeHumidityMeasurement);
    pub const ILLUMINANCE_MEASUREMENT: Self = Self::plain(ClusterKind::IlluminanceMeasurement);
    pub const OCCUPANCY_SENSING_PIR: Self = Self::new(
        ClusterKind::OccupancySensing,
        measurement::occupancy_features::PASSIVE_INFRARED,
    );
    pub const AIR_QUALITY: Self = Self::new(
        ClusterKind::AirQuality,
        measurement::air_quality_features::FAIR
            | measurement::air_quality_features::MODERATE
            | measurement::air_quality_features::VERY_POOR
            | measurement::air_quality_features::EXTREMELY_POOR,
    );

    /// Concentration measurement with numeric measurement and level indication.
    pub const fn concentration(kind: ClusterKind) -> Self {
        Self::new(
            kind,
            measurement::concentration_features::NUMERIC_MEASUREMENT
                | measurement::concentration_features::LEVEL_INDICATION,
        )
    }
}

impl From<ClusterKind> for BehaviorType {
    fn from(kind: ClusterKind) -> Self {
        Self::plain(kind)
    }
}

/// Reference to an attached cluster: a behavior type, a numeric id, or a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterRef<'a> {
    Behavior(BehaviorType),
    Id(ClusterId),
    Name(&'a str),
}

impl ClusterRef<'_> {
    /// Numeric cluster id, if the reference names a known cluster.
    pub fn cluster_id(&self) -> Option<ClusterId> {
        match self {
            Self::Behavior(behavior) => Some(behavior.id()),
            Self::Id(id) => Some(*id),
            Self::Name(name) => ClusterKind::from_name(name).map(ClusterKind::id),
        }
    }
}

impl fmt::Display for ClusterRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Behavior(behavior) => write!(f, "{}", behavior.kind),
            Self::Id(id) => match ClusterKind::from_id(*id) {
                Some(kind) => write!(f, "{}", kind),
                None => write!(f, "0x{:04X}", id),
            },
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<BehaviorType> for ClusterRef<'_> {
    fn from(behavior: BehaviorType) -> Self {
        Self::Behavior(behavior)
    }
}

impl From<ClusterKind> for ClusterRef<'_> {
    fn from(kind: ClusterKind) -> Self {
        Self::Id(kind.id())
    }
}

impl From<ClusterId> for ClusterRef<'_> {
    fn from(id: ClusterId) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a str> for ClusterRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}
