//! Thermostat cluster (0x0201) state.
//!
//! Temperatures are in hundredths of a degree Celsius.

use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Feature flags for Thermostat
pub mod features {
    pub const HEATING: u32 = 0x01;
    pub const COOLING: u32 = 0x02;
    pub const OCCUPANCY: u32 = 0x04;
    pub const SCHEDULE_CONFIGURATION: u32 = 0x08;
    pub const SETBACK: u32 = 0x10;
    pub const AUTO_MODE: u32 = 0x20;
}

/// SystemMode attribute values (subset).
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum SystemMode {
    Off = 0,
    Auto = 1,
    Cool = 3,
    Heat = 4,
}

/// ControlSequenceOfOperation values (subset).
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum ControlSequence {
    CoolingOnly = 0,
    HeatingOnly = 2,
    CoolingAndHeating = 4,
}

/// Mode argument of `setpointRaiseLower`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "camelCase")]
pub enum SetpointRaiseLowerMode {
    Heat = 0,
    Cool = 1,
    Both = 2,
}

cluster_state! {
    pub struct ThermostatState(ThermostatAttribute) {
        0x0000 => LocalTemperature("localTemperature") local_temperature: Option<i16>,
        0x0003 => AbsMinHeatSetpointLimit("absMinHeatSetpointLimit") abs_min_heat_setpoint_limit: i16
            where features::HEATING,
        0x0004 => AbsMaxHeatSetpointLimit("absMaxHeatSetpointLimit") abs_max_heat_setpoint_limit: i16
            where features::HEATING,
        0x0005 => AbsMinCoolSetpointLimit("absMinCoolSetpointLimit") abs_min_cool_setpoint_limit: i16
            where features::COOLING,
        0x0006 => AbsMaxCoolSetpointLimit("absMaxCoolSetpointLimit") abs_max_cool_setpoint_limit: i16
            where features::COOLING,
        0x0011 => OccupiedCoolingSetpoint("occupiedCoolingSetpoint") occupied_cooling_setpoint: i16
            where features::COOLING,
        0x0012 => OccupiedHeatingSetpoint("occupiedHeatingSetpoint") occupied_heating_setpoint: i16
            where features::HEATING,
        0x0015 => MinHeatSetpointLimit("minHeatSetpointLimit") min_heat_setpoint_limit: i16
            where features::HEATING,
        0x0016 => MaxHeatSetpointLimit("maxHeatSetpointLimit") max_heat_setpoint_limit: i16
            where features::HEATING,
        0x0017 => MinCoolSetpointLimit("minCoolSetpointLimit") min_cool_setpoint_limit: i16
            where features::COOLING,
        0x0018 => MaxCoolSetpointLimit("maxCoolSetpointLimit") max_cool_setpoint_limit: i16
            where features::COOLING,
        /// Minimum heat/cool separation in tenths of a degree
        0x0019 => MinSetpointDeadBand("minSetpointDeadBand") min_setpoint_dead_band: i8
            where features::AUTO_MODE,
        0x001B => ControlSequenceOfOperation("controlSequenceOfOperation") control_sequence_of_operation: u8,
        0x001C => SystemMode("systemMode") system_mode: u8,
        0x001E => ThermostatRunningMode("thermostatRunningMode") thermostat_running_mode: u8
            where features::AUTO_MODE,
    }
}

/// Degrees Celsius to the cluster's hundredths representation.
pub fn celsius(degrees: f32) -> i16 {
    (degrees * 100.0).round() as i16
}

impl ThermostatState {
    /// Heating-only thermostat, all values in degrees Celsius.
    pub fn heating(local: f32, setpoint: f32, min: f32, max: f32) -> Self {
        let (min, max) = (celsius(min), celsius(max));
        Self {
            local_temperature: Some(celsius(local)),
            abs_min_heat_setpoint_limit: min,
            abs_max_heat_setpoint_limit: max,
            occupied_heating_setpoint: celsius(setpoint).clamp(min, max),
            min_heat_setpoint_limit: min,
            max_heat_setpoint_limit: max,
            control_sequence_of_operation: ControlSequence::HeatingOnly as u8,
            system_mode: SystemMode::Heat as u8,
            ..Self::default()
        }
    }

    /// Effective heating limits; the narrower of the configured and absolute bounds.
    pub fn heat_limits(&self) -> (i16, i16) {
        (
            self.min_heat_setpoint_limit.max(self.abs_min_heat_setpoint_limit),
            self.max_heat_setpoint_limit.min(self.abs_max_heat_setpoint_limit),
        )
    }

    pub fn cool_limits(&self) -> (i16, i16) {
        (
            self.min_cool_setpoint_limit.max(self.abs_min_cool_setpoint_limit),
            self.max_cool_setpoint_limit.min(self.abs_max_cool_setpoint_limit),
        )
    }
}

impl Default for ThermostatState {
    fn default() -> Self {
        Self {
            local_temperature: Some(2300),
            abs_min_heat_setpoint_limit: 0,
            abs_max_heat_setpoint_limit: 5000,
            abs_min_cool_setpoint_limit: 0,
            abs_max_cool_setpoint_limit: 5000,
            occupied_cooling_setpoint: 2500,
            occupied_heating_setpoint: 2100,
            min_heat_setpoint_limit: 0,
            max_heat_setpoint_limit: 5000,
            min_cool_setpoint_limit: 0,
            max_cool_setpoint_limit: 5000,
            min_setpoint_dead_band: 20,
            control_sequence_of_operation: ControlSequence::CoolingAndHeating as u8,
            system_mode: SystemMode::Auto as u8,
            thermostat_running_mode: 0,
        }
    }
}
