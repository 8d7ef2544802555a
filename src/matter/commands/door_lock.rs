//! DoorLock commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::DoorLockState;
use crate::matter::clusters::door_lock::LockState;
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "lockDoor"),
    CommandSpec::new(0x01, "unlockDoor"),
    CommandSpec::new(0x03, "unlockWithTimeout"),
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockWithTimeoutRequest {
    /// Seconds until the lock relocks
    pub timeout: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DoorLockCommand {
    LockDoor(LockRequest),
    UnlockDoor(LockRequest),
    UnlockWithTimeout(UnlockWithTimeoutRequest),
}

impl DoorLockCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::LockDoor(_) => "lockDoor",
            Self::UnlockDoor(_) => "unlockDoor",
            Self::UnlockWithTimeout(_) => "unlockWithTimeout",
        }
    }
}

pub(super) async fn handle(inv: &Invocation<'_>, cmd: DoorLockCommand) -> Result<CommandResponse> {
    let target = match cmd {
        DoorLockCommand::LockDoor(_) => LockState::Locked,
        DoorLockCommand::UnlockDoor(_) | DoorLockCommand::UnlockWithTimeout(_) => {
            LockState::Unlocked
        }
    };
    inv.forward_then(|s: &mut DoorLockState| s.lock_state = Some(target as u8))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::BehaviorType;
    use crate::matter::commands::testing::endpoint_with;
    use crate::matter::commands::{Command, CommandInterceptor};
    use crate::matter::device_types;

    #[tokio::test]
    async fn test_unlock_then_lock() {
        let (endpoint, recorder) = endpoint_with(
            device_types::DOOR_LOCK,
            vec![(BehaviorType::DOOR_LOCK, DoorLockState::default().into())],
        );

        CommandInterceptor::invoke(
            &endpoint,
            Command::DoorLock(DoorLockCommand::UnlockWithTimeout(UnlockWithTimeoutRequest {
                timeout: 10,
                pin_code: None,
            })),
        )
        .await
        .unwrap();
        assert_eq!(
            endpoint.read_state::<DoorLockState, _>(0x0101, |s| s.state()).unwrap(),
            Some(LockState::Unlocked)
        );
        assert_eq!(recorder.calls.lock()[0].1, serde_json::json!({"timeout": 10}));

        CommandInterceptor::invoke(
            &endpoint,
            Command::DoorLock(DoorLockCommand::LockDoor(LockRequest::default())),
        )
        .await
        .unwrap();
        assert_eq!(
            endpoint.read_state::<DoorLockState, _>(0x0101, |s| s.state()).unwrap(),
            Some(LockState::Locked)
        );
    }
}
