//! OperationalState and RvcOperationalState commands.
//!
//! Both clusters answer every command with `operationalCommandResponse`.
//! Every command reaches the device; the device decides what the current
//! state allows. Once it accepts, the state follows the command. The RVC
//! variant keeps the run mode in step: pausing or going home selects the
//! idle mode, resuming the cleaning mode.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::modes::rvc_run_tags;
use crate::matter::clusters::operational_state::{
    ErrorStateId, ErrorStateStruct, OperationalCommandResponse, OperationalStateId,
};
use crate::matter::clusters::{
    ClusterKind, OperationalStateState, RvcOperationalStateState, RvcRunModeState,
};
use crate::matter::endpoints::Endpoint;
use serde::Serialize;

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "pause").responds(0x04),
    CommandSpec::new(0x01, "stop").responds(0x04),
    CommandSpec::new(0x02, "start").responds(0x04),
    CommandSpec::new(0x03, "resume").responds(0x04),
];

pub const RVC_COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "pause").responds(0x04),
    CommandSpec::new(0x03, "resume").responds(0x04),
    CommandSpec::new(0x80, "goHome").responds(0x04),
];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationalStateCommand {
    Pause,
    Stop,
    Start,
    Resume,
}

impl OperationalStateCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Start => "start",
            Self::Resume => "resume",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RvcOperationalStateCommand {
    Pause,
    Resume,
    GoHome,
}

impl RvcOperationalStateCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::GoHome => "goHome",
        }
    }
}

fn respond(error: ErrorStateId) -> CommandResponse {
    CommandResponse::Operational(OperationalCommandResponse {
        command_response_state: ErrorStateStruct::new(error),
    })
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: OperationalStateCommand,
) -> Result<CommandResponse> {
    let target = match cmd {
        OperationalStateCommand::Pause => OperationalStateId::Paused,
        OperationalStateCommand::Resume | OperationalStateCommand::Start => {
            OperationalStateId::Running
        }
        OperationalStateCommand::Stop => OperationalStateId::Stopped,
    };
    inv.forward().await?;
    inv.mutate(|s: &mut OperationalStateState| s.transition(target))?;
    Ok(respond(ErrorStateId::NoError))
}

/// Select the first run mode carrying `tag`, if the endpoint has RvcRunMode.
fn select_run_mode(endpoint: &Endpoint, tag: u16) -> Result<()> {
    let cluster = ClusterKind::RvcRunMode.id();
    if !endpoint.has_cluster(cluster) {
        return Ok(());
    }
    endpoint.mutate_state(cluster, |s: &mut RvcRunModeState| {
        if let Some(mode) = s.mode_with_tag(tag) {
            s.current_mode = mode;
        }
    })
}

pub(super) async fn handle_rvc(
    inv: &Invocation<'_>,
    cmd: RvcOperationalStateCommand,
) -> Result<CommandResponse> {
    let (target, run_tag) = match cmd {
        RvcOperationalStateCommand::Pause => (OperationalStateId::Paused, rvc_run_tags::IDLE),
        RvcOperationalStateCommand::Resume => (OperationalStateId::Running, rvc_run_tags::CLEANING),
        RvcOperationalStateCommand::GoHome => (OperationalStateId::Docked, rvc_run_tags::IDLE),
    };
    inv.forward().await?;
    select_run_mode(inv.endpoint, run_tag)?;
    inv.mutate(|s: &mut RvcOperationalStateState| s.transition(target))?;
    Ok(respond(ErrorStateId::NoError))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::BehaviorType;
    use crate::matter::commands::testing::{Recorder, endpoint_with, endpoint_with_recorder};
    use crate::matter::commands::{Command, CommandInterceptor};
    use crate::matter::device_types;

    fn state(endpoint: &Endpoint) -> Option<OperationalStateId> {
        endpoint
            .read_state::<OperationalStateState, _>(0x0060, |s| s.state())
            .unwrap()
    }

    #[tokio::test]
    async fn test_pause_while_stopped_reaches_device() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ROBOTIC_VACUUM_CLEANER,
            vec![(BehaviorType::OPERATIONAL_STATE, OperationalStateState::default().into())],
        );
        assert_eq!(state(&endpoint), Some(OperationalStateId::Stopped));
        let response = CommandInterceptor::invoke(
            &endpoint,
            Command::OperationalState(OperationalStateCommand::Pause),
        )
        .await
        .unwrap();
        assert_eq!(response, respond(ErrorStateId::NoError));
        assert_eq!(recorder.operations(), vec!["pause"]);
        assert_eq!(state(&endpoint), Some(OperationalStateId::Paused));

        CommandInterceptor::invoke(
            &endpoint,
            Command::OperationalState(OperationalStateCommand::Start),
        )
        .await
        .unwrap();
        assert_eq!(state(&endpoint), Some(OperationalStateId::Running));
        assert_eq!(recorder.operations(), vec!["pause", "start"]);
    }

    #[tokio::test]
    async fn test_resume_from_error_clears_error() {
        let mut initial = OperationalStateState::new(OperationalStateId::Error);
        initial.operational_error = ErrorStateStruct::new(ErrorStateId::UnableToCompleteOperation);
        let (endpoint, recorder) = endpoint_with(
            device_types::ROBOTIC_VACUUM_CLEANER,
            vec![(BehaviorType::OPERATIONAL_STATE, initial.into())],
        );
        let response = CommandInterceptor::invoke(
            &endpoint,
            Command::OperationalState(OperationalStateCommand::Resume),
        )
        .await
        .unwrap();
        assert_eq!(response, respond(ErrorStateId::NoError));
        assert_eq!(recorder.operations(), vec!["resume"]);
        assert_eq!(state(&endpoint), Some(OperationalStateId::Running));
        let error = endpoint
            .read_state::<OperationalStateState, _>(0x0060, |s| s.operational_error.clone())
            .unwrap();
        assert_eq!(error, ErrorStateStruct::no_error());
    }

    #[tokio::test]
    async fn test_failed_forward_keeps_state() {
        let (endpoint, _) = endpoint_with_recorder(
            device_types::ROBOTIC_VACUUM_CLEANER,
            vec![(BehaviorType::OPERATIONAL_STATE, OperationalStateState::default().into())],
            Recorder {
                fail: true,
                ..Default::default()
            },
        );
        let result = CommandInterceptor::invoke(
            &endpoint,
            Command::OperationalState(OperationalStateCommand::Start),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(state(&endpoint), Some(OperationalStateId::Stopped));
    }

    #[tokio::test]
    async fn test_rvc_pause_resume_go_home() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ROBOTIC_VACUUM_CLEANER,
            vec![
                (
                    BehaviorType::RVC_RUN_MODE,
                    RvcRunModeState {
                        current_mode: 2,
                        ..RvcRunModeState::default()
                    }
                    .into(),
                ),
                (
                    BehaviorType::RVC_OPERATIONAL_STATE,
                    RvcOperationalStateState::new(OperationalStateId::Running).into(),
                ),
            ],
        );
        let read = |endpoint: &Endpoint| {
            let run = endpoint
                .read_state::<RvcRunModeState, _>(0x0054, |s| s.current_mode)
                .unwrap();
            let op = endpoint
                .read_state::<RvcOperationalStateState, _>(0x0061, |s| s.state())
                .unwrap();
            (run, op)
        };

        CommandInterceptor::invoke(
            &endpoint,
            Command::RvcOperationalState(RvcOperationalStateCommand::Pause),
        )
        .await
        .unwrap();
        assert_eq!(read(&endpoint), (1, Some(OperationalStateId::Paused)));

        CommandInterceptor::invoke(
            &endpoint,
            Command::RvcOperationalState(RvcOperationalStateCommand::Resume),
        )
        .await
        .unwrap();
        assert_eq!(read(&endpoint), (2, Some(OperationalStateId::Running)));

        CommandInterceptor::invoke(
            &endpoint,
            Command::RvcOperationalState(RvcOperationalStateCommand::GoHome),
        )
        .await
        .unwrap();
        assert_eq!(read(&endpoint), (1, Some(OperationalStateId::Docked)));
        assert_eq!(recorder.operations(), vec!["pause", "resume", "goHome"]);

        // Docked: resume still reaches the device and starts cleaning
        let response = CommandInterceptor::invoke(
            &endpoint,
            Command::RvcOperationalState(RvcOperationalStateCommand::Resume),
        )
        .await
        .unwrap();
        assert_eq!(response, respond(ErrorStateId::NoError));
        assert_eq!(read(&endpoint), (2, Some(OperationalStateId::Running)));
        assert_eq!(recorder.operations(), vec!["pause", "resume", "goHome", "resume"]);
    }
}
