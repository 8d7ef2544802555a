//! DoorLock cluster (0x0101) state.

use strum::FromRepr;

/// LockState attribute values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum LockState {
    NotFullyLocked = 0,
    Locked = 1,
    Unlocked = 2,
    Unlatched = 3,
}

/// LockType attribute values (subset).
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum LockType {
    DeadBolt = 0,
    Magnetic = 1,
    Other = 2,
    Mortise = 3,
}

cluster_state! {
    pub struct DoorLockState(DoorLockAttribute) {
        /// Nullable [`LockState`]
        0x0000 => LockState("lockState") lock_state: Option<u8>,
        0x0001 => LockType("lockType") lock_type: u8,
        0x0002 => ActuatorEnabled("actuatorEnabled") actuator_enabled: bool,
        0x0025 => OperatingMode("operatingMode") operating_mode: u8,
        /// Inverted bitmap: a cleared bit means the mode is supported
        0x0026 => SupportedOperatingModes("supportedOperatingModes") supported_operating_modes: u16,
    }
}

impl DoorLockState {
    pub fn new(state: LockState) -> Self {
        Self {
            lock_state: Some(state as u8),
            ..Self::default()
        }
    }

    pub fn state(&self) -> Option<LockState> {
        self.lock_state.and_then(LockState::from_repr)
    }
}

impl Default for DoorLockState {
    fn default() -> Self {
        Self {
            lock_state: Some(LockState::Locked as u8),
            lock_type: LockType::DeadBolt as u8,
            actuator_enabled: true,
            operating_mode: 0,
            supported_operating_modes: 0xFFF6,
        }
    }
}
