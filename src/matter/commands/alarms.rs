//! BooleanStateConfiguration and SmokeCoAlarm commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::BooleanStateConfigurationState;
use crate::matter::clusters::boolean_state::features;
use serde::{Deserialize, Serialize};

pub const BOOLEAN_STATE_CONFIGURATION_COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "suppressAlarm").requires(features::ALARM_SUPPRESS),
    CommandSpec::new(0x01, "enableDisableAlarm").requires(features::VISUAL | features::AUDIBLE),
];

pub const SMOKE_CO_ALARM_COMMANDS: &[CommandSpec] = &[CommandSpec::new(0x00, "selfTestRequest")];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppressAlarmRequest {
    pub alarms_to_suppress: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableDisableAlarmRequest {
    pub alarms_to_enable_disable: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BooleanStateConfigurationCommand {
    SuppressAlarm(SuppressAlarmRequest),
    EnableDisableAlarm(EnableDisableAlarmRequest),
}

impl BooleanStateConfigurationCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::SuppressAlarm(_) => "suppressAlarm",
            Self::EnableDisableAlarm(_) => "enableDisableAlarm",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SmokeCoAlarmCommand {
    SelfTestRequest,
}

impl SmokeCoAlarmCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::SelfTestRequest => "selfTestRequest",
        }
    }
}

pub(super) async fn handle_boolean_state_configuration(
    inv: &Invocation<'_>,
    cmd: BooleanStateConfigurationCommand,
) -> Result<CommandResponse> {
    match cmd {
        BooleanStateConfigurationCommand::SuppressAlarm(req) => {
            inv.forward_then(|s: &mut BooleanStateConfigurationState| {
                s.suppress_alarms(req.alarms_to_suppress)
            })
            .await
        }
        BooleanStateConfigurationCommand::EnableDisableAlarm(req) => {
            inv.forward_then(|s: &mut BooleanStateConfigurationState| {
                s.enable_alarms(req.alarms_to_enable_disable)
            })
            .await
        }
    }
}

/// The device runs the test and reports `testInProgress` itself.
pub(super) async fn handle_smoke_co_alarm(
    inv: &Invocation<'_>,
    cmd: SmokeCoAlarmCommand,
) -> Result<CommandResponse> {
    match cmd {
        SmokeCoAlarmCommand::SelfTestRequest => {
            inv.forward().await?;
            Ok(CommandResponse::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::boolean_state::alarm_mode;
    use crate::matter::clusters::{BehaviorType, SmokeCoAlarmState};
    use crate::matter::commands::testing::endpoint_with;
    use crate::matter::commands::{Command, CommandInterceptor};
    use crate::matter::device_types;

    #[tokio::test]
    async fn test_enable_then_suppress() {
        let state = BooleanStateConfigurationState {
            alarms_active: alarm_mode::VISUAL | alarm_mode::AUDIBLE,
            ..Default::default()
        };
        let (endpoint, _) = endpoint_with(
            device_types::WATER_LEAK_DETECTOR,
            vec![(BehaviorType::BOOLEAN_STATE_CONFIGURATION, state.into())],
        );

        CommandInterceptor::invoke(
            &endpoint,
            Command::BooleanStateConfiguration(BooleanStateConfigurationCommand::EnableDisableAlarm(
                EnableDisableAlarmRequest {
                    alarms_to_enable_disable: alarm_mode::AUDIBLE,
                },
            )),
        )
        .await
        .unwrap();
        CommandInterceptor::invoke(
            &endpoint,
            Command::BooleanStateConfiguration(BooleanStateConfigurationCommand::SuppressAlarm(
                SuppressAlarmRequest {
                    alarms_to_suppress: alarm_mode::VISUAL | alarm_mode::AUDIBLE,
                },
            )),
        )
        .await
        .unwrap();

        let (enabled, active, suppressed) = endpoint
            .read_state::<BooleanStateConfigurationState, _>(0x0080, |s| {
                (s.alarms_enabled, s.alarms_active, s.alarms_suppressed)
            })
            .unwrap();
        assert_eq!(enabled, alarm_mode::AUDIBLE);
        assert_eq!(active, alarm_mode::AUDIBLE);
        assert_eq!(suppressed, alarm_mode::AUDIBLE);
    }

    #[tokio::test]
    async fn test_self_test_only_forwards() {
        let (endpoint, recorder) = endpoint_with(
            device_types::SMOKE_CO_ALARM,
            vec![(BehaviorType::SMOKE_CO_ALARM, SmokeCoAlarmState::default().into())],
        );
        let response = CommandInterceptor::invoke(
            &endpoint,
            Command::SmokeCoAlarm(SmokeCoAlarmCommand::SelfTestRequest),
        )
        .await
        .unwrap();
        assert_eq!(response, CommandResponse::None);
        assert_eq!(recorder.operations(), vec!["selfTestRequest"]);
        assert!(
            !endpoint
                .read_state::<SmokeCoAlarmState, _>(0x005C, |s| s.test_in_progress)
                .unwrap()
        );
    }
}
