//! Identify commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::IdentifyState;
use crate::matter::clusters::general::EffectIdentifier;
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "identify"),
    CommandSpec::new(0x40, "triggerEffect"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyRequest {
    /// Seconds; 0 stops identifying
    pub identify_time: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEffectRequest {
    pub effect_identifier: u8,
    pub effect_variant: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IdentifyCommand {
    Identify(IdentifyRequest),
    TriggerEffect(TriggerEffectRequest),
}

impl IdentifyCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Identify(_) => "identify",
            Self::TriggerEffect(_) => "triggerEffect",
        }
    }
}

/// How long an effect keeps the device identifying, in seconds.
fn effect_duration(effect: Option<EffectIdentifier>) -> u16 {
    match effect {
        Some(EffectIdentifier::Blink) => 1,
        Some(EffectIdentifier::Breathe) => 15,
        Some(EffectIdentifier::Okay) => 2,
        Some(EffectIdentifier::ChannelChange) => 8,
        Some(EffectIdentifier::FinishEffect | EffectIdentifier::StopEffect) | None => 0,
    }
}

pub(super) async fn handle(inv: &Invocation<'_>, cmd: IdentifyCommand) -> Result<CommandResponse> {
    let identify_time = match &cmd {
        IdentifyCommand::Identify(req) => req.identify_time,
        IdentifyCommand::TriggerEffect(req) => {
            effect_duration(EffectIdentifier::from_repr(req.effect_identifier))
        }
    };
    inv.forward_then(|s: &mut IdentifyState| s.identify_time = identify_time)
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
    async fn test_identify_and_stop_effect() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ON_OFF_LIGHT,
            vec![(BehaviorType::IDENTIFY, IdentifyState::default().into())],
        );

        CommandInterceptor::invoke(
            &endpoint,
            Command::Identify(IdentifyCommand::Identify(IdentifyRequest { identify_time: 30 })),
        )
        .await
        .unwrap();
        assert_eq!(
            endpoint.read_state::<IdentifyState, _>(0x0003, |s| s.identify_time).unwrap(),
            30
        );

        CommandInterceptor::invoke(
            &endpoint,
            Command::Identify(IdentifyCommand::TriggerEffect(TriggerEffectRequest {
                effect_identifier: EffectIdentifier::StopEffect as u8,
                effect_variant: 0,
            })),
        )
        .await
        .unwrap();
        assert_eq!(
            endpoint.read_state::<IdentifyState, _>(0x0003, |s| s.identify_time).unwrap(),
            0
        );
        assert_eq!(recorder.operations(), vec!["identify", "triggerEffect"]);
    }
}
