//! Sensor clusters: TemperatureMeasurement (0x0402), RelativeHumidityMeasurement
//! (0x0405), IlluminanceMeasurement (0x0400), OccupancySensing (0x0406),
//! AirQuality (0x005B) and the concentration-measurement family.

use strum::FromRepr;

cluster_state! {
    /// Temperatures in hundredths of a degree Celsius.
    pub struct TemperatureMeasurementState(TemperatureMeasurementAttribute) {
        0x0000 => MeasuredValue("measuredValue") measured_value: Option<i16>,
        0x0001 => MinMeasuredValue("minMeasuredValue") min_measured_value: Option<i16>,
        0x0002 => MaxMeasuredValue("maxMeasuredValue") max_measured_value: Option<i16>,
        0x0003 => Tolerance("tolerance") tolerance: u16,
    }
}

impl Default for TemperatureMeasurementState {
    fn default() -> Self {
        Self {
            measured_value: None,
            min_measured_value: Some(-4000),
            max_measured_value: Some(12500),
            tolerance: 0,
        }
    }
}

cluster_state! {
    /// Humidity in hundredths of a percent.
    pub struct RelativeHumidityMeasurementState(RelativeHumidityMeasurementAttribute) {
        0x0000 => MeasuredValue("measuredValue") measured_value: Option<u16>,
        0x0001 => MinMeasuredValue("minMeasuredValue") min_measured_value: Option<u16>,
        0x0002 => MaxMeasuredValue("maxMeasuredValue") max_measured_value: Option<u16>,
        0x0003 => Tolerance("tolerance") tolerance: u16,
    }
}

impl Default for RelativeHumidityMeasurementState {
    fn default() -> Self {
        Self {
            measured_value: None,
            min_measured_value: Some(0),
            max_measured_value: Some(10000),
            tolerance: 0,
        }
    }
}

cluster_state! {
    /// Illuminance as `10000 * log10(lux) + 1`.
    pub struct IlluminanceMeasurementState(IlluminanceMeasurementAttribute) {
        0x0000 => MeasuredValue("measuredValue") measured_value: Option<u16>,
        0x0001 => MinMeasuredValue("minMeasuredValue") min_measured_value: Option<u16>,
        0x0002 => MaxMeasuredValue("maxMeasuredValue") max_measured_value: Option<u16>,
        0x0003 => Tolerance("tolerance") tolerance: u16,
        0x0004 => LightSensorType("lightSensorType") light_sensor_type: Option<u8>,
    }
}

impl IlluminanceMeasurementState {
    /// Encode a lux reading; 0 lux maps to 0 (too dark to measure).
    pub fn lux_to_measured(lux: f64) -> u16 {
        if lux <= 0.0 {
            return 0;
        }
        (10000.0 * lux.log10() + 1.0).clamp(1.0, 65534.0).round() as u16
    }
}

impl Default for IlluminanceMeasurementState {
    fn default() -> Self {
        Self {
            measured_value: None,
            min_measured_value: Some(1),
            max_measured_value: Some(65534),
            tolerance: 0,
            light_sensor_type: None,
        }
    }
}

/// Feature flags for OccupancySensing
pub mod occupancy_features {
    pub const OTHER: u32 = 0x01;
    pub const PASSIVE_INFRARED: u32 = 0x02;
    pub const ULTRASONIC: u32 = 0x04;
    pub const PHYSICAL_CONTACT: u32 = 0x08;
}

cluster_state! {
    pub struct OccupancySensingState(OccupancySensingAttribute) {
        /// Bit 0: occupied
        0x0000 => Occupancy("occupancy") occupancy: u8,
        0x0001 => OccupancySensorType("occupancySensorType") occupancy_sensor_type: u8,
        0x0002 => OccupancySensorTypeBitmap("occupancySensorTypeBitmap") occupancy_sensor_type_bitmap: u8,
    }
}

impl Default for OccupancySensingState {
    fn default() -> Self {
        Self {
            occupancy: 0,
            // PIR
            occupancy_sensor_type: 0,
            occupancy_sensor_type_bitmap: 0x01,
        }
    }
}

/// Feature flags for AirQuality
pub mod air_quality_features {
    pub const FAIR: u32 = 0x01;
    pub const MODERATE: u32 = 0x02;
    pub const VERY_POOR: u32 = 0x04;
    pub const EXTREMELY_POOR: u32 = 0x08;
}

/// AirQuality enum values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum AirQualityLevel {
    Unknown = 0,
    Good = 1,
    Fair = 2,
    Moderate = 3,
    Poor = 4,
    VeryPoor = 5,
    ExtremelyPoor = 6,
}

cluster_state! {
    pub struct AirQualityState(AirQualityAttribute) {
        0x0000 => AirQuality("airQuality") air_quality: u8,
    }
}

impl Default for AirQualityState {
    fn default() -> Self {
        Self {
            air_quality: AirQualityLevel::Unknown as u8,
        }
    }
}

/// Feature flags shared by every concentration-measurement cluster
pub mod concentration_features {
    pub const NUMERIC_MEASUREMENT: u32 = 0x01;
    pub const LEVEL_INDICATION: u32 = 0x02;
    pub const MEDIUM_LEVEL: u32 = 0x04;
    pub const CRITICAL_LEVEL: u32 = 0x08;
    pub const PEAK_MEASUREMENT: u32 = 0x10;
    pub const AVERAGE_MEASUREMENT: u32 = 0x20;
}

/// Reserved attribute names of the concentration family, indexed by id.
pub const CONCENTRATION_ATTRIBUTE_NAMES: [&str; 11] = [
    "measuredValue",
    "minMeasuredValue",
    "maxMeasuredValue",
    "peakMeasuredValue",
    "peakMeasuredValueWindow",
    "averageMeasuredValue",
    "averageMeasuredValueWindow",
    "uncertainty",
    "measurementUnit",
    "measurementMedium",
    "levelValue",
];

/// MeasurementUnit values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum MeasurementUnit {
    Ppm = 0,
    Ppb = 1,
    Ppt = 2,
    Mgm3 = 3,
    Ugm3 = 4,
    Ngm3 = 5,
    Pm3 = 6,
    Bqm3 = 7,
}

cluster_state! {
    /// Shared by every concentration cluster; the cluster kind picks the id.
    pub struct ConcentrationMeasurementState(ConcentrationMeasurementAttribute) {
        0x0000 => MeasuredValue("measuredValue") measured_value: Option<f32>
            where concentration_features::NUMERIC_MEASUREMENT,
        0x0001 => MinMeasuredValue("minMeasuredValue") min_measured_value: Option<f32>
            where concentration_features::NUMERIC_MEASUREMENT,
        0x0002 => MaxMeasuredValue("maxMeasuredValue") max_measured_value: Option<f32>
            where concentration_features::NUMERIC_MEASUREMENT,
        0x0003 => PeakMeasuredValue("peakMeasuredValue") peak_measured_value: Option<f32>
            where concentration_features::PEAK_MEASUREMENT,
        0x0004 => PeakMeasuredValueWindow("peakMeasuredValueWindow") peak_measured_value_window: u32
            where concentration_features::PEAK_MEASUREMENT,
        0x0005 => AverageMeasuredValue("averageMeasuredValue") average_measured_value: Option<f32>
            where concentration_features::AVERAGE_MEASUREMENT,
        0x0006 => AverageMeasuredValueWindow("averageMeasuredValueWindow") average_measured_value_window: u32
            where concentration_features::AVERAGE_MEASUREMENT,
        0x0007 => Uncertainty("uncertainty") uncertainty: f32
            where concentration_features::NUMERIC_MEASUREMENT,
        0x0008 => MeasurementUnit("measurementUnit") measurement_unit: u8
            where concentration_features::NUMERIC_MEASUREMENT,
        /// Air (0), water (1) or soil (2)
        0x0009 => MeasurementMedium("measurementMedium") measurement_medium: u8,
        0x000A => LevelValue("levelValue") level_value: u8
            where concentration_features::LEVEL_INDICATION,
    }
}

impl Default for ConcentrationMeasurementState {
    fn default() -> Self {
        Self {
            measured_value: None,
            min_measured_value: None,
            max_measured_value: None,
            peak_measured_value: None,
            peak_measured_value_window: 1,
            average_measured_value: None,
            average_measured_value_window: 1,
            uncertainty: 0.0,
            measurement_unit: MeasurementUnit::Ppm as u8,
            measurement_medium: 0,
            level_value: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::ClusterAttribute;

    #[test]
    fn test_concentration_names_match_reserved_ids() {
        for (id, name) in CONCENTRATION_ATTRIBUTE_NAMES.iter().enumerate() {
            let attr = ConcentrationMeasurementAttribute::from_id(id as u32).unwrap();
            assert_eq!(attr.name(), *name);
        }
    }

    #[test]
    fn test_lux_encoding() {
        assert_eq!(IlluminanceMeasurementState::lux_to_measured(0.0), 0);
        assert_eq!(IlluminanceMeasurementState::lux_to_measured(1.0), 1);
        assert_eq!(IlluminanceMeasurementState::lux_to_measured(100.0), 20001);
    }
}
