//! FanControl commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::FanControlState;
use crate::matter::clusters::fan_control::{FanMode, StepDirection, features};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[CommandSpec::new(0x00, "step").requires(features::STEP)];

/// Percent moved by a single step.
const STEP_PERCENT: u8 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    pub direction: StepDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowest_off: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FanControlCommand {
    Step(StepRequest),
}

impl FanControlCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Step(_) => "step",
        }
    }
}

/// Percent after one step from `current`.
///
/// `lowest_off` lets a decrease reach 0; otherwise the floor is one step.
fn step_percent(current: u8, req: &StepRequest) -> u8 {
    let wrap = req.wrap.unwrap_or(false);
    let floor = if req.lowest_off.unwrap_or(true) {
        0
    } else {
        STEP_PERCENT
    };
    match req.direction {
        StepDirection::Increase if current >= 100 => {
            if wrap {
                floor
            } else {
                100
            }
        }
        StepDirection::Increase => current.saturating_add(STEP_PERCENT).min(100),
        StepDirection::Decrease if current <= floor => {
            if wrap {
                100
            } else {
                floor
            }
        }
        StepDirection::Decrease => current.saturating_sub(STEP_PERCENT).max(floor),
    }
}

/// Fan mode matching a percent setting.
fn mode_for_percent(percent: u8) -> FanMode {
    match percent {
        0 => FanMode::Off,
        1..=33 => FanMode::Low,
        34..=66 => FanMode::Medium,
        _ => FanMode::High,
    }
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: FanControlCommand,
) -> Result<CommandResponse> {
    let multi_speed = inv.has_feature(features::MULTI_SPEED);
    match cmd {
        FanControlCommand::Step(req) => {
            inv.forward_then(|s: &mut FanControlState| {
                let current = s.percent_setting.unwrap_or(s.percent_current);
                let percent = step_percent(current, &req);
                s.percent_setting = Some(percent);
                s.percent_current = percent;
                s.fan_mode = mode_for_percent(percent) as u8;
                if multi_speed {
                    let speed = s.speed_for_percent(percent);
                    s.speed_setting = Some(speed);
                    s.speed_current = speed;
                }
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

    fn step(direction: StepDirection, wrap: bool, lowest_off: bool) -> StepRequest {
        StepRequest {
            direction,
            wrap: Some(wrap),
            lowest_off: Some(lowest_off),
        }
    }

    #[test]
    fn test_step_percent() {
        assert_eq!(step_percent(50, &step(StepDirection::Increase, false, true)), 60);
        assert_eq!(step_percent(95, &step(StepDirection::Increase, false, true)), 100);
        assert_eq!(step_percent(100, &step(StepDirection::Increase, false, true)), 100);
        assert_eq!(step_percent(100, &step(StepDirection::Increase, true, true)), 0);
        assert_eq!(step_percent(100, &step(StepDirection::Increase, true, false)), 10);
        assert_eq!(step_percent(5, &step(StepDirection::Decrease, false, true)), 0);
        assert_eq!(step_percent(0, &step(StepDirection::Decrease, true, true)), 100);
        assert_eq!(step_percent(15, &step(StepDirection::Decrease, false, false)), 10);
        assert_eq!(step_percent(10, &step(StepDirection::Decrease, true, false)), 100);
        assert_eq!(step_percent(10, &step(StepDirection::Decrease, false, false)), 10);
    }

    #[tokio::test]
    async fn test_step_updates_speed_and_mode() {
        let (endpoint, recorder) = endpoint_with(
            device_types::FAN,
            vec![(
                BehaviorType::FAN_CONTROL_MULTI_SPEED_AUTO_STEP,
                FanControlState::default().into(),
            )],
        );
        for _ in 0..4 {
            CommandInterceptor::invoke(
                &endpoint,
                Command::FanControl(FanControlCommand::Step(StepRequest {
                    direction: StepDirection::Increase,
                    wrap: None,
                    lowest_off: None,
                })),
            )
            .await
            .unwrap();
        }
        let (percent, speed, mode) = endpoint
            .read_state::<FanControlState, _>(0x0202, |s| {
                (s.percent_setting, s.speed_setting, s.mode())
            })
            .unwrap();
        assert_eq!(percent, Some(40));
        assert_eq!(speed, Some(40));
        assert_eq!(mode, Some(FanMode::Medium));
        assert_eq!(
            recorder.calls.lock()[0].1,
            serde_json::json!({"direction": "increase"})
        );
    }

    #[tokio::test]
    async fn test_decrease_from_lowest_step_wraps_to_full() {
        let state = FanControlState {
            fan_mode: FanMode::Low as u8,
            percent_setting: Some(10),
            percent_current: 10,
            ..Default::default()
        };
        let (endpoint, recorder) =
            endpoint_with(device_types::FAN, vec![(BehaviorType::FAN_CONTROL_STEP, state.into())]);
        let command = FanControlCommand::Step(step(StepDirection::Decrease, true, false));
        CommandInterceptor::invoke(&endpoint, Command::FanControl(command)).await.unwrap();
        let (setting, current, mode) = endpoint
            .read_state::<FanControlState, _>(0x0202, |s| {
                (s.percent_setting, s.percent_current, s.mode())
            })
            .unwrap();
        assert_eq!(setting, Some(100));
        assert_eq!(current, 100);
        assert_eq!(mode, Some(FanMode::High));
        assert_eq!(recorder.operations(), vec!["step"]);
    }
}
