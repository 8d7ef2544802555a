//! WindowCovering cluster (0x0102) state.
//!
//! Positions are in percent100ths: 0 is fully open, 10000 fully closed.

/// Feature flags for WindowCovering
pub mod features {
    pub const LIFT: u32 = 0x01;
    pub const TILT: u32 = 0x02;
    pub const POSITION_AWARE_LIFT: u32 = 0x04;
    pub const ABSOLUTE_POSITION: u32 = 0x08;
    pub const POSITION_AWARE_TILT: u32 = 0x10;
}

/// Fully open position.
pub const FULLY_OPEN: u16 = 0;
/// Fully closed position.
pub const FULLY_CLOSED: u16 = 10000;

cluster_state! {
    pub struct WindowCoveringState(WindowCoveringAttribute) {
        0x0000 => Type("type") covering_type: u8,
        0x0007 => ConfigStatus("configStatus") config_status: u8,
        0x0008 => CurrentPositionLiftPercentage("currentPositionLiftPercentage") current_position_lift_percentage: Option<u8>
            where features::POSITION_AWARE_LIFT,
        0x0009 => CurrentPositionTiltPercentage("currentPositionTiltPercentage") current_position_tilt_percentage: Option<u8>
            where features::POSITION_AWARE_TILT,
        /// Bitmap: global (bits 0-1), lift (bits 2-3), tilt (bits 4-5)
        0x000A => OperationalStatus("operationalStatus") operational_status: u8,
        0x000B => TargetPositionLiftPercent100ths("targetPositionLiftPercent100ths") target_position_lift_percent_100ths: Option<u16>
            where features::POSITION_AWARE_LIFT,
        0x000C => TargetPositionTiltPercent100ths("targetPositionTiltPercent100ths") target_position_tilt_percent_100ths: Option<u16>
            where features::POSITION_AWARE_TILT,
        0x000D => EndProductType("endProductType") end_product_type: u8,
        0x000E => CurrentPositionLiftPercent100ths("currentPositionLiftPercent100ths") current_position_lift_percent_100ths: Option<u16>
            where features::POSITION_AWARE_LIFT,
        0x000F => CurrentPositionTiltPercent100ths("currentPositionTiltPercent100ths") current_position_tilt_percent_100ths: Option<u16>
            where features::POSITION_AWARE_TILT,
        0x0017 => Mode("mode") mode: u8,
    }
}

impl WindowCoveringState {
    /// Covering resting at `position` (percent100ths) for both lift and tilt.
    pub fn at_position(position: u16) -> Self {
        let position = position.min(FULLY_CLOSED);
        let percent = Some((position / 100) as u8);
        Self {
            current_position_lift_percentage: percent,
            current_position_tilt_percentage: percent,
            target_position_lift_percent_100ths: Some(position),
            target_position_tilt_percent_100ths: Some(position),
            current_position_lift_percent_100ths: Some(position),
            current_position_tilt_percent_100ths: Some(position),
            ..Self::default()
        }
    }
}

impl Default for WindowCoveringState {
    fn default() -> Self {
        Self {
            // Rollershade
            covering_type: 0,
            // Operational | Online | LiftPositionAware
            config_status: 0x0B,
            current_position_lift_percentage: Some(0),
            current_position_tilt_percentage: Some(0),
            operational_status: 0,
            target_position_lift_percent_100ths: Some(FULLY_OPEN),
            target_position_tilt_percent_100ths: Some(FULLY_OPEN),
            end_product_type: 0,
            current_position_lift_percent_100ths: Some(FULLY_OPEN),
            current_position_tilt_percent_100ths: Some(FULLY_OPEN),
            mode: 0,
        }
    }
}
