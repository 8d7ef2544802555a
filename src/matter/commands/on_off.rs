//! OnOff commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::OnOffState;
use crate::matter::clusters::on_off::features;
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "off"),
    CommandSpec::new(0x01, "on"),
    CommandSpec::new(0x02, "toggle"),
    CommandSpec::new(0x40, "offWithEffect").requires(features::LIGHTING),
    CommandSpec::new(0x42, "onWithTimedOff").requires(features::LIGHTING),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffWithEffectRequest {
    pub effect_identifier: u8,
    pub effect_variant: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnWithTimedOffRequest {
    /// Bit 0: accept only when on
    pub on_off_control: u8,
    /// Tenths of a second
    pub on_time: u16,
    pub off_wait_time: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OnOffCommand {
    Off,
    On,
    Toggle,
    OffWithEffect(OffWithEffectRequest),
    OnWithTimedOff(OnWithTimedOffRequest),
}

impl OnOffCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Toggle => "toggle",
            Self::OffWithEffect(_) => "offWithEffect",
            Self::OnWithTimedOff(_) => "onWithTimedOff",
        }
    }
}

pub(super) async fn handle(inv: &Invocation<'_>, cmd: OnOffCommand) -> Result<CommandResponse> {
    let lighting = inv.has_feature(features::LIGHTING);
    match cmd {
        OnOffCommand::On => {
            inv.forward_then(|s: &mut OnOffState| {
                s.on_off = true;
                if lighting {
                    s.global_scene_control = true;
                }
            })
            .await
        }
        OnOffCommand::Off => {
            inv.forward_then(|s: &mut OnOffState| {
                s.on_off = false;
                if lighting {
                    s.on_time = 0;
                }
            })
            .await
        }
        OnOffCommand::Toggle => {
            inv.forward_then(|s: &mut OnOffState| s.on_off = !s.on_off).await
        }
        OnOffCommand::OffWithEffect(_) => {
            inv.forward_then(|s: &mut OnOffState| {
                s.on_off = false;
                s.global_scene_control = false;
                s.on_time = 0;
            })
            .await
        }
        OnOffCommand::OnWithTimedOff(req) => {
            let accept_only_when_on = req.on_off_control & 0x01 != 0;
            if accept_only_when_on && !inv.read(|s: &OnOffState| s.on_off)? {
                log::debug!("[Matter] onWithTimedOff ignored while off");
                return Ok(CommandResponse::None);
            }
            inv.forward_then(|s: &mut OnOffState| {
                s.on_off = true;
                s.on_time = s.on_time.max(req.on_time);
                s.off_wait_time = req.off_wait_time;
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

    fn on_off(endpoint: &crate::matter::endpoints::Endpoint) -> bool {
        endpoint.read_state::<OnOffState, _>(0x0006, |s| s.on_off).unwrap()
    }

    #[tokio::test]
    async fn test_on_off_toggle() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ON_OFF_PLUG_IN_UNIT,
            vec![(BehaviorType::ON_OFF, OnOffState::default().into())],
        );

        CommandInterceptor::invoke(&endpoint, Command::OnOff(OnOffCommand::On))
            .await
            .unwrap();
        assert!(on_off(&endpoint));
        CommandInterceptor::invoke(&endpoint, Command::OnOff(OnOffCommand::Toggle))
            .await
            .unwrap();
        assert!(!on_off(&endpoint));
        CommandInterceptor::invoke(&endpoint, Command::OnOff(OnOffCommand::Off))
            .await
            .unwrap();
        assert!(!on_off(&endpoint));

        assert_eq!(recorder.operations(), vec!["on", "toggle", "off"]);
        // Argument-less commands forward an empty request object
        assert_eq!(recorder.calls.lock()[0].1, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_on_with_timed_off() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ON_OFF_LIGHT,
            vec![(BehaviorType::ON_OFF_LIGHTING, OnOffState::default().into())],
        );
        let request = OnWithTimedOffRequest {
            on_off_control: 0x01,
            on_time: 600,
            off_wait_time: 50,
        };

        // Accept-only-when-on while off: ignored
        CommandInterceptor::invoke(
            &endpoint,
            Command::OnOff(OnOffCommand::OnWithTimedOff(request.clone())),
        )
        .await
        .unwrap();
        assert!(!on_off(&endpoint));
        assert!(recorder.operations().is_empty());

        CommandInterceptor::invoke(
            &endpoint,
            Command::OnOff(OnOffCommand::OnWithTimedOff(OnWithTimedOffRequest {
                on_off_control: 0,
                ..request
            })),
        )
        .await
        .unwrap();
        let (on, on_time, off_wait) = endpoint
            .read_state::<OnOffState, _>(0x0006, |s| (s.on_off, s.on_time, s.off_wait_time))
            .unwrap();
        assert!(on);
        assert_eq!(on_time, 600);
        assert_eq!(off_wait, 50);
    }
}
