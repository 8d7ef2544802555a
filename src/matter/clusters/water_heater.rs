//! WaterHeaterManagement cluster (0x0094) state.

use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Feature flags for WaterHeaterManagement
pub mod features {
    pub const ENERGY_MANAGEMENT: u32 = 0x01;
    pub const TANK_PERCENT: u32 = 0x02;
}

/// WaterHeaterHeatSource bits used by `heaterTypes` and `heatDemand`.
pub mod heat_source {
    pub const IMMERSION_ELEMENT_1: u8 = 0x01;
    pub const IMMERSION_ELEMENT_2: u8 = 0x02;
    pub const HEAT_PUMP: u8 = 0x04;
    pub const BOILER: u8 = 0x08;
    pub const OTHER: u8 = 0x10;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr, Serialize, Deserialize)]
#[repr(u8)]
pub enum BoostState {
    Inactive = 0,
    Active = 1,
}

/// Argument of the `boost` command.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostInfo {
    /// Boost duration in seconds
    pub duration: u32,
    #[serde(default)]
    pub one_shot: Option<bool>,
    #[serde(default)]
    pub emergency_boost: Option<bool>,
    #[serde(default)]
    pub temporary_setpoint: Option<i16>,
    #[serde(default)]
    pub target_percentage: Option<u8>,
    #[serde(default)]
    pub target_reheat: Option<u8>,
}

cluster_state! {
    pub struct WaterHeaterManagementState(WaterHeaterManagementAttribute) {
        0x0000 => HeaterTypes("heaterTypes") heater_types: u8,
        0x0001 => HeatDemand("heatDemand") heat_demand: u8,
        /// Litres
        0x0002 => TankVolume("tankVolume") tank_volume: u16 where features::ENERGY_MANAGEMENT,
        /// mWh
        0x0003 => EstimatedHeatRequired("estimatedHeatRequired") estimated_heat_required: i64
            where features::ENERGY_MANAGEMENT,
        0x0004 => TankPercentage("tankPercentage") tank_percentage: u8 where features::TANK_PERCENT,
        0x0005 => BoostState("boostState") boost_state: u8,
    }
}

impl WaterHeaterManagementState {
    pub fn boost(&self) -> Option<BoostState> {
        BoostState::from_repr(self.boost_state)
    }
}

impl Default for WaterHeaterManagementState {
    fn default() -> Self {
        Self {
            heater_types: heat_source::IMMERSION_ELEMENT_1,
            heat_demand: 0,
            tank_volume: 0,
            estimated_heat_required: 0,
            tank_percentage: 90,
            boost_state: BoostState::Inactive as u8,
        }
    }
}
