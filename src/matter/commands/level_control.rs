//! LevelControl commands.
//!
//! Only `moveToLevel` and `moveToLevelWithOnOff` change local state; the
//! continuous `move`/`step`/`stop` family is left to the device, which reports
//! the resulting level back through attribute updates.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::{ClusterKind, LevelControlState, OnOffState};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "moveToLevel"),
    CommandSpec::new(0x01, "move"),
    CommandSpec::new(0x02, "step"),
    CommandSpec::new(0x03, "stop"),
    CommandSpec::new(0x04, "moveToLevelWithOnOff"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToLevelRequest {
    pub level: u8,
    /// Tenths of a second
    #[serde(default)]
    pub transition_time: Option<u16>,
    #[serde(default)]
    pub options_mask: u8,
    #[serde(default)]
    pub options_override: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// 0 = up, 1 = down
    pub move_mode: u8,
    /// Units per second
    #[serde(default)]
    pub rate: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    pub step_mode: u8,
    pub step_size: u8,
    #[serde(default)]
    pub transition_time: Option<u16>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LevelControlCommand {
    MoveToLevel(MoveToLevelRequest),
    Move(MoveRequest),
    Step(StepRequest),
    Stop,
    MoveToLevelWithOnOff(MoveToLevelRequest),
}

impl LevelControlCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::MoveToLevel(_) => "moveToLevel",
            Self::Move(_) => "move",
            Self::Step(_) => "step",
            Self::Stop => "stop",
            Self::MoveToLevelWithOnOff(_) => "moveToLevelWithOnOff",
        }
    }
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: LevelControlCommand,
) -> Result<CommandResponse> {
    match cmd {
        LevelControlCommand::MoveToLevel(req) => {
            inv.forward_then(|s: &mut LevelControlState| {
                s.current_level = Some(s.clamp(req.level));
            })
            .await
        }
        LevelControlCommand::MoveToLevelWithOnOff(req) => {
            inv.forward().await?;
            let (level, min) = inv.mutate(|s: &mut LevelControlState| {
                let level = s.clamp(req.level);
                s.current_level = Some(level);
                (level, s.min_level)
            })?;
            let on_off = ClusterKind::OnOff.id();
            if inv.endpoint.has_cluster(on_off) {
                inv.endpoint
                    .mutate_state(on_off, |s: &mut OnOffState| s.on_off = level > min)?;
            }
            Ok(CommandResponse::None)
        }
        LevelControlCommand::Move(_) | LevelControlCommand::Step(_) | LevelControlCommand::Stop => {
            inv.forward().await?;
            Ok(CommandResponse::None)
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

    fn move_to(level: u8) -> MoveToLevelRequest {
        MoveToLevelRequest {
            level,
            transition_time: None,
            options_mask: 0,
            options_override: 0,
        }
    }

    #[tokio::test]
    async fn test_move_to_level_clamps() {
        let (endpoint, _) = endpoint_with(
            device_types::DIMMABLE_LIGHT,
            vec![(BehaviorType::LEVEL_CONTROL_LIGHTING, LevelControlState::new(100).into())],
        );
        CommandInterceptor::invoke(
            &endpoint,
            Command::LevelControl(LevelControlCommand::MoveToLevel(move_to(255))),
        )
        .await
        .unwrap();
        assert_eq!(
            endpoint
                .read_state::<LevelControlState, _>(0x0008, |s| s.current_level)
                .unwrap(),
            Some(254)
        );
    }

    #[tokio::test]
    async fn test_move_to_level_with_on_off_couples() {
        let (endpoint, recorder) = endpoint_with(
            device_types::DIMMABLE_LIGHT,
            vec![
                (BehaviorType::ON_OFF_LIGHTING, OnOffState::default().into()),
                (BehaviorType::LEVEL_CONTROL_LIGHTING, LevelControlState::new(1).into()),
            ],
        );
        CommandInterceptor::invoke(
            &endpoint,
            Command::LevelControl(LevelControlCommand::MoveToLevelWithOnOff(move_to(120))),
        )
        .await
        .unwrap();
        assert!(endpoint.read_state::<OnOffState, _>(0x0006, |s| s.on_off).unwrap());

        CommandInterceptor::invoke(
            &endpoint,
            Command::LevelControl(LevelControlCommand::MoveToLevelWithOnOff(move_to(0))),
        )
        .await
        .unwrap();
        assert!(!endpoint.read_state::<OnOffState, _>(0x0006, |s| s.on_off).unwrap());
        assert_eq!(recorder.calls.lock()[0].1["level"], 120);
    }

    #[tokio::test]
    async fn test_stop_only_forwards() {
        let (endpoint, recorder) = endpoint_with(
            device_types::DIMMABLE_LIGHT,
            vec![(BehaviorType::LEVEL_CONTROL_ON_OFF, LevelControlState::new(42).into())],
        );
        CommandInterceptor::invoke(&endpoint, Command::LevelControl(LevelControlCommand::Stop))
            .await
            .unwrap();
        assert_eq!(recorder.operations(), vec!["stop"]);
        assert_eq!(
            endpoint
                .read_state::<LevelControlState, _>(0x0008, |s| s.current_level)
                .unwrap(),
            Some(42)
        );
    }
}
