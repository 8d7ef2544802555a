//! WindowCovering commands.
//!
//! Commands only move the target position; the current position follows once
//! the device reports progress.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::{BridgeError, Result};
use crate::matter::clusters::WindowCoveringState;
use crate::matter::clusters::window_covering::{FULLY_CLOSED, FULLY_OPEN, features};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "upOrOpen"),
    CommandSpec::new(0x01, "downOrClose"),
    CommandSpec::new(0x02, "stopMotion"),
    CommandSpec::new(0x05, "goToLiftPercentage").requires(features::POSITION_AWARE_LIFT),
    CommandSpec::new(0x08, "goToTiltPercentage").requires(features::POSITION_AWARE_TILT),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoToLiftPercentageRequest {
    pub lift_percent_100ths_value: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoToTiltPercentageRequest {
    pub tilt_percent_100ths_value: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WindowCoveringCommand {
    UpOrOpen,
    DownOrClose,
    StopMotion,
    GoToLiftPercentage(GoToLiftPercentageRequest),
    GoToTiltPercentage(GoToTiltPercentageRequest),
}

impl WindowCoveringCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::UpOrOpen => "upOrOpen",
            Self::DownOrClose => "downOrClose",
            Self::StopMotion => "stopMotion",
            Self::GoToLiftPercentage(_) => "goToLiftPercentage",
            Self::GoToTiltPercentage(_) => "goToTiltPercentage",
        }
    }
}

fn check_position(attribute: &str, value: u16) -> Result<u16> {
    if value > FULLY_CLOSED {
        return Err(BridgeError::InvalidValue {
            attribute: attribute.to_string(),
            reason: format!("{} exceeds {}", value, FULLY_CLOSED),
        });
    }
    Ok(value)
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: WindowCoveringCommand,
) -> Result<CommandResponse> {
    let lift = inv.has_feature(features::POSITION_AWARE_LIFT);
    let tilt = inv.has_feature(features::POSITION_AWARE_TILT);
    let move_both = move |target: u16| {
        move |s: &mut WindowCoveringState| {
            if lift {
                s.target_position_lift_percent_100ths = Some(target);
            }
            if tilt {
                s.target_position_tilt_percent_100ths = Some(target);
            }
        }
    };

    match cmd {
        WindowCoveringCommand::UpOrOpen => inv.forward_then(move_both(FULLY_OPEN)).await,
        WindowCoveringCommand::DownOrClose => inv.forward_then(move_both(FULLY_CLOSED)).await,
        WindowCoveringCommand::StopMotion => {
            inv.forward_then(|s: &mut WindowCoveringState| {
                if lift {
                    s.target_position_lift_percent_100ths = s.current_position_lift_percent_100ths;
                }
                if tilt {
                    s.target_position_tilt_percent_100ths = s.current_position_tilt_percent_100ths;
                }
            })
            .await
        }
        WindowCoveringCommand::GoToLiftPercentage(req) => {
            let target = check_position("liftPercent100thsValue", req.lift_percent_100ths_value)?;
            inv.forward_then(|s: &mut WindowCoveringState| {
                s.target_position_lift_percent_100ths = Some(target);
            })
            .await
        }
        WindowCoveringCommand::GoToTiltPercentage(req) => {
            let target = check_position("tiltPercent100thsValue", req.tilt_percent_100ths_value)?;
            inv.forward_then(|s: &mut WindowCoveringState| {
                s.target_position_tilt_percent_100ths = Some(target);
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

    fn targets(endpoint: &crate::matter::endpoints::Endpoint) -> (Option<u16>, Option<u16>) {
        endpoint
            .read_state::<WindowCoveringState, _>(0x0102, |s| {
                (
                    s.target_position_lift_percent_100ths,
                    s.target_position_tilt_percent_100ths,
                )
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_close_stop() {
        let (endpoint, _) = endpoint_with(
            device_types::WINDOW_COVERING,
            vec![(
                BehaviorType::WINDOW_COVERING_LIFT_TILT,
                WindowCoveringState::at_position(5000).into(),
            )],
        );

        CommandInterceptor::invoke(
            &endpoint,
            Command::WindowCovering(WindowCoveringCommand::DownOrClose),
        )
        .await
        .unwrap();
        assert_eq!(targets(&endpoint), (Some(10000), Some(10000)));

        CommandInterceptor::invoke(
            &endpoint,
            Command::WindowCovering(WindowCoveringCommand::StopMotion),
        )
        .await
        .unwrap();
        assert_eq!(targets(&endpoint), (Some(5000), Some(5000)));

        CommandInterceptor::invoke(
            &endpoint,
            Command::WindowCovering(WindowCoveringCommand::UpOrOpen),
        )
        .await
        .unwrap();
        assert_eq!(targets(&endpoint), (Some(0), Some(0)));
    }

    #[tokio::test]
    async fn test_go_to_lift_rejects_out_of_range() {
        let (endpoint, recorder) = endpoint_with(
            device_types::WINDOW_COVERING,
            vec![(BehaviorType::WINDOW_COVERING_LIFT, WindowCoveringState::default().into())],
        );
        let err = CommandInterceptor::invoke(
            &endpoint,
            Command::WindowCovering(WindowCoveringCommand::GoToLiftPercentage(
                GoToLiftPercentageRequest {
                    lift_percent_100ths_value: 10001,
                },
            )),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidValue { .. }));
        assert!(recorder.operations().is_empty());

        CommandInterceptor::invoke(
            &endpoint,
            Command::WindowCovering(WindowCoveringCommand::GoToLiftPercentage(
                GoToLiftPercentageRequest {
                    lift_percent_100ths_value: 2500,
                },
            )),
        )
        .await
        .unwrap();
        assert_eq!(targets(&endpoint).0, Some(2500));
    }
}
