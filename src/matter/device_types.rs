//! Device type declarations for bridged endpoints.
//!
//! Each declaration pairs the Matter device type (code + revision) with the
//! clusters an endpoint of that type must and may expose. The cluster
//! resolver reads these lists to attach default behaviors.

use super::clusters::ClusterKind;
use rs_matter::dm::{ClusterId, DeviceType};

/// A device type with its cluster requirements.
#[derive(Clone, Copy, Debug)]
pub struct DeviceTypeDeclaration {
    pub device_type: DeviceType,
    pub name: &'static str,
    pub required: &'static [ClusterId],
    pub optional: &'static [ClusterId],
}

impl DeviceTypeDeclaration {
    pub const fn code(&self) -> u16 {
        self.device_type.dtype
    }

    pub const fn revision(&self) -> u16 {
        self.device_type.drev
    }
}

const IDENTIFY: ClusterId = ClusterKind::Identify.id();
const ON_OFF: ClusterId = ClusterKind::OnOff.id();
const LEVEL_CONTROL: ClusterId = ClusterKind::LevelControl.id();
const COLOR_CONTROL: ClusterId = ClusterKind::ColorControl.id();
const POWER_SOURCE: ClusterId = ClusterKind::PowerSource.id();

/// Matter On/Off Light device type
///
/// Device Type ID: 0x0100
/// Device Type Revision: 3
///
/// Required clusters: Identify, OnOff
pub const ON_OFF_LIGHT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0100,
        drev: 3,
    },
    name: "OnOffLight",
    required: &[IDENTIFY, ON_OFF],
    optional: &[LEVEL_CONTROL],
};

/// Matter Dimmable Light device type
///
/// Device Type ID: 0x0101
/// Device Type Revision: 3
pub const DIMMABLE_LIGHT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0101,
        drev: 3,
    },
    name: "DimmableLight",
    required: &[IDENTIFY, ON_OFF, LEVEL_CONTROL],
    optional: &[],
};

/// Matter Color Temperature Light device type
///
/// Device Type ID: 0x010C
/// Device Type Revision: 4
pub const COLOR_TEMPERATURE_LIGHT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x010C,
        drev: 4,
    },
    name: "ColorTemperatureLight",
    required: &[IDENTIFY, ON_OFF, LEVEL_CONTROL, COLOR_CONTROL],
    optional: &[],
};

/// Matter Extended Color Light device type
///
/// Device Type ID: 0x010D
/// Device Type Revision: 4
pub const EXTENDED_COLOR_LIGHT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x010D,
        drev: 4,
    },
    name: "ExtendedColorLight",
    required: &[IDENTIFY, ON_OFF, LEVEL_CONTROL, COLOR_CONTROL],
    optional: &[],
};

/// Matter On/Off Plug-in Unit device type
///
/// Device Type ID: 0x010A
/// Device Type Revision: 3
///
/// Used for standalone on/off switches.
pub const ON_OFF_PLUG_IN_UNIT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x010A,
        drev: 3,
    },
    name: "OnOffPlugInUnit",
    required: &[IDENTIFY, ON_OFF],
    optional: &[LEVEL_CONTROL],
};

/// Matter Dimmable Plug-in Unit device type
///
/// Device Type ID: 0x010B
/// Device Type Revision: 4
pub const DIMMABLE_PLUG_IN_UNIT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x010B,
        drev: 4,
    },
    name: "DimmablePlugInUnit",
    required: &[IDENTIFY, ON_OFF, LEVEL_CONTROL],
    optional: &[],
};

/// Matter Window Covering device type
///
/// Device Type ID: 0x0202
/// Device Type Revision: 4
pub const WINDOW_COVERING: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0202,
        drev: 4,
    },
    name: "WindowCovering",
    required: &[IDENTIFY, ClusterKind::WindowCovering.id()],
    optional: &[],
};

/// Matter Door Lock device type
///
/// Device Type ID: 0x000A
/// Device Type Revision: 3
pub const DOOR_LOCK: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x000A,
        drev: 3,
    },
    name: "DoorLock",
    required: &[IDENTIFY, ClusterKind::DoorLock.id()],
    optional: &[],
};

/// Matter Fan device type
///
/// Device Type ID: 0x002B
/// Device Type Revision: 3
pub const FAN: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x002B,
        drev: 3,
    },
    name: "Fan",
    required: &[IDENTIFY, ClusterKind::FanControl.id()],
    optional: &[ON_OFF],
};

/// Matter Thermostat device type
///
/// Device Type ID: 0x0301
/// Device Type Revision: 4
pub const THERMOSTAT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0301,
        drev: 4,
    },
    name: "Thermostat",
    required: &[IDENTIFY, ClusterKind::Thermostat.id()],
    optional: &[],
};

/// Matter Water Valve device type
///
/// Device Type ID: 0x0042
/// Device Type Revision: 1
pub const WATER_VALVE: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0042,
        drev: 1,
    },
    name: "WaterValve",
    required: &[IDENTIFY, ClusterKind::ValveConfigurationAndControl.id()],
    optional: &[],
};

/// Matter Mode Select device type
///
/// Device Type ID: 0x0027
/// Device Type Revision: 1
pub const MODE_SELECT: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0027,
        drev: 1,
    },
    name: "ModeSelect",
    required: &[ClusterKind::ModeSelect.id()],
    optional: &[],
};

/// Matter Contact Sensor device type
///
/// Device Type ID: 0x0015
/// Device Type Revision: 2
///
/// Used for binary sensors (open/closed, true/false states).
pub const CONTACT_SENSOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0015,
        drev: 2,
    },
    name: "ContactSensor",
    required: &[IDENTIFY, ClusterKind::BooleanState.id()],
    optional: &[ClusterKind::BooleanStateConfiguration.id()],
};

/// Matter Water Leak Detector device type
///
/// Device Type ID: 0x0043
/// Device Type Revision: 1
pub const WATER_LEAK_DETECTOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0043,
        drev: 1,
    },
    name: "WaterLeakDetector",
    required: &[IDENTIFY, ClusterKind::BooleanState.id()],
    optional: &[ClusterKind::BooleanStateConfiguration.id()],
};

/// Matter Smoke CO Alarm device type
///
/// Device Type ID: 0x0076
/// Device Type Revision: 1
pub const SMOKE_CO_ALARM: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0076,
        drev: 1,
    },
    name: "SmokeCoAlarm",
    required: &[IDENTIFY, ClusterKind::SmokeCoAlarm.id()],
    optional: &[POWER_SOURCE],
};

/// Matter Temperature Sensor device type
///
/// Device Type ID: 0x0302
/// Device Type Revision: 2
pub const TEMPERATURE_SENSOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0302,
        drev: 2,
    },
    name: "TemperatureSensor",
    required: &[IDENTIFY, ClusterKind::TemperatureMeasurement.id()],
    optional: &[],
};

/// Matter Humidity Sensor device type
///
/// Device Type ID: 0x0307
/// Device Type Revision: 2
pub const HUMIDITY_SENSOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0307,
        drev: 2,
    },
    name: "HumiditySensor",
    required: &[IDENTIFY, ClusterKind::RelativeHumidityMeasurement.id()],
    optional: &[],
};

/// Matter Light Sensor device type
///
/// Device Type ID: 0x0106
/// Device Type Revision: 3
pub const LIGHT_SENSOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0106,
        drev: 3,
    },
    name: "LightSensor",
    required: &[IDENTIFY, ClusterKind::IlluminanceMeasurement.id()],
    optional: &[],
};

/// Matter Occupancy Sensor device type
///
/// Device Type ID: 0x0107
/// Device Type Revision: 4
///
/// Used for motion/presence sensors.
pub const OCCUPANCY_SENSOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0107,
        drev: 4,
    },
    name: "OccupancySensor",
    required: &[IDENTIFY, ClusterKind::OccupancySensing.id()],
    optional: &[],
};

/// Matter Air Quality Sensor device type
///
/// Device Type ID: 0x002C
/// Device Type Revision: 1
pub const AIR_QUALITY_SENSOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x002C,
        drev: 1,
    },
    name: "AirQualitySensor",
    required: &[IDENTIFY, ClusterKind::AirQuality.id()],
    optional: &[
        ClusterKind::TemperatureMeasurement.id(),
        ClusterKind::RelativeHumidityMeasurement.id(),
        ClusterKind::CarbonMonoxideConcentrationMeasurement.id(),
        ClusterKind::CarbonDioxideConcentrationMeasurement.id(),
        ClusterKind::NitrogenDioxideConcentrationMeasurement.id(),
        ClusterKind::OzoneConcentrationMeasurement.id(),
        ClusterKind::FormaldehydeConcentrationMeasurement.id(),
        ClusterKind::Pm1ConcentrationMeasurement.id(),
        ClusterKind::Pm25ConcentrationMeasurement.id(),
        ClusterKind::Pm10ConcentrationMeasurement.id(),
        ClusterKind::RadonConcentrationMeasurement.id(),
        ClusterKind::TotalVolatileOrganicCompoundsConcentrationMeasurement.id(),
    ],
};

/// Matter Robotic Vacuum Cleaner device type
///
/// Device Type ID: 0x0074
/// Device Type Revision: 3
pub const ROBOTIC_VACUUM_CLEANER: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0074,
        drev: 3,
    },
    name: "RoboticVacuumCleaner",
    required: &[
        IDENTIFY,
        ClusterKind::RvcRunMode.id(),
        ClusterKind::RvcOperationalState.id(),
    ],
    optional: &[ClusterKind::RvcCleanMode.id(), ClusterKind::ServiceArea.id()],
};

/// Matter Water Heater device type
///
/// Device Type ID: 0x050F
/// Device Type Revision: 1
///
/// Required clusters:
/// - Identify (0x0003)
/// - Thermostat (0x0201), heating only
/// - WaterHeaterManagement (0x0094)
/// - WaterHeaterMode (0x009E)
pub const WATER_HEATER: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x050F,
        drev: 1,
    },
    name: "WaterHeater",
    required: &[
        IDENTIFY,
        ClusterKind::Thermostat.id(),
        ClusterKind::WaterHeaterManagement.id(),
        ClusterKind::WaterHeaterMode.id(),
    ],
    optional: &[],
};

/// Matter Power Source device type
///
/// Device Type ID: 0x0011
/// Device Type Revision: 1
pub const POWER_SOURCE_DEVICE: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0011,
        drev: 1,
    },
    name: "PowerSource",
    required: &[POWER_SOURCE],
    optional: &[],
};

/// Matter Bridged Node device type
///
/// Device Type ID: 0x0013
/// Device Type Revision: 3
///
/// Added next to the functional device type on every bridged endpoint.
pub const BRIDGED_NODE: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x0013,
        drev: 3,
    },
    name: "BridgedNode",
    required: &[ClusterKind::BridgedDeviceBasicInformation.id()],
    optional: &[POWER_SOURCE],
};

/// Matter Aggregator device type
///
/// Device Type ID: 0x000E
/// Device Type Revision: 1
pub const AGGREGATOR: DeviceTypeDeclaration = DeviceTypeDeclaration {
    device_type: DeviceType {
        dtype: 0x000E,
        drev: 1,
    },
    name: "Aggregator",
    required: &[],
    optional: &[],
};

/// Every declaration known to the bridge.
pub const ALL: &[DeviceTypeDeclaration] = &[
    ON_OFF_LIGHT,
    DIMMABLE_LIGHT,
    COLOR_TEMPERATURE_LIGHT,
    EXTENDED_COLOR_LIGHT,
    ON_OFF_PLUG_IN_UNIT,
    DIMMABLE_PLUG_IN_UNIT,
    WINDOW_COVERING,
    DOOR_LOCK,
    FAN,
    THERMOSTAT,
    WATER_VALVE,
    MODE_SELECT,
    CONTACT_SENSOR,
    WATER_LEAK_DETECTOR,
    SMOKE_CO_ALARM,
    TEMPERATURE_SENSOR,
    HUMIDITY_SENSOR,
    LIGHT_SENSOR,
    OCCUPANCY_SENSOR,
    AIR_QUALITY_SENSOR,
    ROBOTIC_VACUUM_CLEANER,
    WATER_HEATER,
    POWER_SOURCE_DEVICE,
    BRIDGED_NODE,
    AGGREGATOR,
];

/// Look up a declaration by device type code.
pub fn by_code(code: u16) -> Option<&'static DeviceTypeDeclaration> {
    ALL.iter().find(|d| d.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.code(), b.code(), "{} and {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_every_required_cluster_is_known() {
        for decl in ALL {
            for id in decl.required.iter().chain(decl.optional) {
                assert!(
                    ClusterKind::from_id(*id).is_some(),
                    "{} lists unknown cluster 0x{:04X}",
                    decl.name,
                    id
                );
            }
        }
    }

    #[test]
    fn test_water_heater_lookup() {
        let decl = by_code(0x050F).unwrap();
        assert_eq!(decl.name, "WaterHeater");
        assert_eq!(decl.revision(), 1);
        assert!(decl.required.contains(&0x0094));
    }
}
