//! ValveConfigurationAndControl cluster (0x0081) state.

use strum::FromRepr;

/// Feature flags for ValveConfigurationAndControl
pub mod features {
    pub const TIME_SYNC: u32 = 0x01;
    pub const LEVEL: u32 = 0x02;
}

/// ValveState values used by `currentState` and `targetState`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum ValvePosition {
    Closed = 0,
    Open = 1,
    Transitioning = 2,
}

cluster_state! {
    pub struct ValveState(ValveAttribute) {
        /// Nullable open duration in seconds
        0x0000 => OpenDuration("openDuration") open_duration: Option<u32>,
        0x0001 => DefaultOpenDuration("defaultOpenDuration") default_open_duration: Option<u32>,
        0x0003 => RemainingDuration("remainingDuration") remaining_duration: Option<u32>,
        0x0004 => CurrentState("currentState") current_state: Option<u8>,
        0x0005 => TargetState("targetState") target_state: Option<u8>,
        0x0006 => CurrentLevel("currentLevel") current_level: Option<u8> where features::LEVEL,
        0x0007 => TargetLevel("targetLevel") target_level: Option<u8> where features::LEVEL,
        0x0008 => DefaultOpenLevel("defaultOpenLevel") default_open_level: u8
            where features::LEVEL,
        0x0009 => ValveFault("valveFault") valve_fault: u16,
    }
}

impl ValveState {
    pub fn position(&self) -> Option<ValvePosition> {
        self.current_state.and_then(ValvePosition::from_repr)
    }
}

impl Default for ValveState {
    fn default() -> Self {
        Self {
            open_duration: None,
            default_open_duration: None,
            remaining_duration: None,
            current_state: Some(ValvePosition::Closed as u8),
            target_state: None,
            current_level: Some(0),
            target_level: None,
            default_open_level: 100,
            valve_fault: 0,
        }
    }
}
