//! OnOff cluster (0x0006) state.

use strum::FromRepr;

/// Feature flags for OnOff
pub mod features {
    /// Lighting (LT): global scene control, timed on/off, start-up behavior
    pub const LIGHTING: u32 = 0x01;
    /// Dead Front Behavior (DF)
    pub const DEAD_FRONT_BEHAVIOR: u32 = 0x02;
    /// Off Only (OFFONLY)
    pub const OFF_ONLY: u32 = 0x04;
}

/// StartUpOnOff attribute values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum StartUpOnOff {
    Off = 0,
    On = 1,
    Toggle = 2,
}

cluster_state! {
    pub struct OnOffState(OnOffAttribute) {
        0x0000 => OnOff("onOff") on_off: bool,
        0x4000 => GlobalSceneControl("globalSceneControl") global_scene_control: bool
            where features::LIGHTING,
        /// Remaining on time in tenths of a second
        0x4001 => OnTime("onTime") on_time: u16 where features::LIGHTING,
        0x4002 => OffWaitTime("offWaitTime") off_wait_time: u16 where features::LIGHTING,
        /// Nullable [`StartUpOnOff`]
        0x4003 => StartUpOnOff("startUpOnOff") start_up_on_off: Option<u8>
            where features::LIGHTING,
    }
}

impl OnOffState {
    pub fn new(on: bool) -> Self {
        Self {
            on_off: on,
            ..Self::default()
        }
    }

    /// Decoded start-up behavior, `None` when null or out of range.
    pub fn start_up(&self) -> Option<StartUpOnOff> {
        self.start_up_on_off.and_then(StartUpOnOff::from_repr)
    }
}

impl Default for OnOffState {
    fn default() -> Self {
        Self {
            on_off: false,
            global_scene_control: true,
            on_time: 0,
            off_wait_time: 0,
            start_up_on_off: None,
        }
    }
}
