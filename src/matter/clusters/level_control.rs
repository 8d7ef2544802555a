//! LevelControl cluster (0x0008) state.

/// Feature flags for LevelControl
pub mod features {
    pub const ON_OFF: u32 = 0x01;
    pub const LIGHTING: u32 = 0x02;
    pub const FREQUENCY: u32 = 0x04;
}

cluster_state! {
    pub struct LevelControlState(LevelControlAttribute) {
        0x0000 => CurrentLevel("currentLevel") current_level: Option<u8>,
        0x0001 => RemainingTime("remainingTime") remaining_time: u16 where features::LIGHTING,
        0x0002 => MinLevel("minLevel") min_level: u8,
        0x0003 => MaxLevel("maxLevel") max_level: u8,
        0x000F => Options("options") options: u8,
        0x0010 => OnOffTransitionTime("onOffTransitionTime") on_off_transition_time: u16,
        0x0011 => OnLevel("onLevel") on_level: Option<u8>,
        0x4000 => StartUpCurrentLevel("startUpCurrentLevel") start_up_current_level: Option<u8>
            where features::LIGHTING,
    }
}

impl LevelControlState {
    pub fn new(current_level: u8) -> Self {
        Self {
            current_level: Some(current_level),
            ..Self::default()
        }
    }

    /// Clamp a requested level into `[min_level, max_level]`.
    pub fn clamp(&self, level: u8) -> u8 {
        level.clamp(self.min_level, self.max_level.max(self.min_level))
    }
}

impl Default for LevelControlState {
    fn default() -> Self {
        Self {
            current_level: Some(254),
            remaining_time: 0,
            min_level: 1,
            max_level: 254,
            options: 0,
            on_off_transition_time: 0,
            on_level: None,
            start_up_current_level: None,
        }
    }
}
