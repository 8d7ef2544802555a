//! ValveConfigurationAndControl commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::{BridgeError, Result};
use crate::matter::clusters::ValveState;
use crate::matter::clusters::valve::{ValvePosition, features};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "open"),
    CommandSpec::new(0x01, "close"),
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequest {
    /// Seconds; falls back to `defaultOpenDuration`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_duration: Option<u32>,
    /// Percent; falls back to `defaultOpenLevel`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValveCommand {
    Open(OpenRequest),
    Close,
}

impl ValveCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Close => "close",
        }
    }
}

pub(super) async fn handle(inv: &Invocation<'_>, cmd: ValveCommand) -> Result<CommandResponse> {
    let level_feature = inv.has_feature(features::LEVEL);
    match cmd {
        ValveCommand::Open(req) => {
            if let Some(level) = req.target_level
                && level > 100
            {
                return Err(BridgeError::InvalidValue {
                    attribute: "targetLevel".to_string(),
                    reason: format!("{} exceeds 100", level),
                });
            }
            inv.forward_then(|s: &mut ValveState| {
                if level_feature {
                    let level = req.target_level.unwrap_or(s.default_open_level);
                    s.target_level = Some(level);
                    s.current_level = Some(level);
                }
                s.target_state = Some(ValvePosition::Open as u8);
                s.current_state = Some(ValvePosition::Open as u8);
                s.open_duration = req.open_duration.or(s.default_open_duration);
                s.remaining_duration = s.open_duration;
            })
            .await
        }
        ValveCommand::Close => {
            inv.forward_then(|s: &mut ValveState| {
                if level_feature {
                    s.target_level = Some(0);
                    s.current_level = Some(0);
                }
                s.target_state = Some(ValvePosition::Closed as u8);
                s.current_state = Some(ValvePosition::Closed as u8);
                s.open_duration = None;
                s.remaining_duration = None;
            })
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::BehaviorType;
    use crate::matter::commands::testing::endpoint_with;
    use crate::matter::commands::{Command, CommandInterceptor};
    use crate::matter::device_types;

    #[tokio::test]
    async fn test_open_uses_default_level_then_close() {
        let (endpoint, _) = endpoint_with(
            device_types::WATER_VALVE,
            vec![(BehaviorType::VALVE_LEVEL, ValveState::default().into())],
        );

        CommandInterceptor::invoke(
            &endpoint,
            Command::Valve(ValveCommand::Open(OpenRequest {
                open_duration: Some(60),
                target_level: None,
            })),
        )
        .await
        .unwrap();
        let (target, level, position, remaining) = endpoint
            .read_state::<ValveState, _>(0x0081, |s| {
                (s.target_level, s.current_level, s.position(), s.remaining_duration)
            })
            .unwrap();
        assert_eq!(target, Some(100));
        assert_eq!(level, Some(100));
        assert_eq!(position, Some(ValvePosition::Open));
        assert_eq!(remaining, Some(60));

        CommandInterceptor::invoke(&endpoint, Command::Valve(ValveCommand::Close))
            .await
            .unwrap();
        let (target, level, position, duration) = endpoint
            .read_state::<ValveState, _>(0x0081, |s| {
                (s.target_level, s.current_level, s.position(), s.open_duration)
            })
            .unwrap();
        assert_eq!(target, Some(0));
        assert_eq!(level, Some(0));
        assert_eq!(position, Some(ValvePosition::Closed));
        assert_eq!(duration, None);
    }

    #[tokio::test]
    async fn test_open_rejects_level_above_100() {
        let (endpoint, recorder) = endpoint_with(
            device_types::WATER_VALVE,
            vec![(BehaviorType::VALVE_LEVEL, ValveState::default().into())],
        );
        let err = CommandInterceptor::invoke(
            &endpoint,
            Command::Valve(ValveCommand::Open(OpenRequest {
                open_duration: None,
                target_level: Some(150),
            })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidValue { .. }));
        assert!(recorder.operations().is_empty());
    }
}
