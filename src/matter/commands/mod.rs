//! Command interception: forward every inbound cluster command to the
//! device handler, then apply the local state transition.
//!
//! Each cluster category lives in its own module with its typed requests,
//! its command table and its state machine. [`CommandInterceptor::invoke`]
//! performs the shared checks (lifecycle, attachment, feature support) and
//! dispatches.

use crate::error::{BridgeError, Result};
use crate::matter::clusters::{
    AttributeValue, BehaviorType, ClusterKind, ClusterStateVariant, CommandId,
};
use crate::matter::clusters::modes::ModeChangeStatus;
use crate::matter::clusters::operational_state::OperationalCommandResponse;
use crate::matter::clusters::service_area::{SelectAreasStatus, SkipAreaStatus};
use crate::matter::endpoints::Endpoint;
use serde::Serialize;

pub mod alarms;
pub mod color_control;
pub mod door_lock;
pub mod fan_control;
pub mod identify;
pub mod level_control;
pub mod modes;
pub mod on_off;
pub mod operational_state;
pub mod service_area;
pub mod thermostat;
pub mod valve;
pub mod water_heater;
pub mod window_covering;

pub use alarms::{BooleanStateConfigurationCommand, SmokeCoAlarmCommand};
pub use color_control::ColorControlCommand;
pub use door_lock::DoorLockCommand;
pub use fan_control::FanControlCommand;
pub use identify::IdentifyCommand;
pub use level_control::LevelControlCommand;
pub use modes::ChangeToMode;
pub use on_off::OnOffCommand;
pub use operational_state::{OperationalStateCommand, RvcOperationalStateCommand};
pub use service_area::ServiceAreaCommand;
pub use thermostat::ThermostatCommand;
pub use valve::ValveCommand;
pub use water_heater::WaterHeaterManagementCommand;
pub use window_covering::WindowCoveringCommand;

/// Static description of one cluster command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: CommandId,
    /// Lower camel case operation name forwarded to the handler
    pub name: &'static str,
    /// Feature bits enabling the command, any of them; 0 = always
    pub features: u32,
    /// Id of the response command, if the command has one
    pub response: Option<CommandId>,
}

impl CommandSpec {
    pub const fn new(id: CommandId, name: &'static str) -> Self {
        Self {
            id,
            name,
            features: 0,
            response: None,
        }
    }

    pub const fn requires(mut self, features: u32) -> Self {
        self.features = features;
        self
    }

    pub const fn responds(mut self, response: CommandId) -> Self {
        self.response = Some(response);
        self
    }

    pub fn enabled(&self, feature_map: u32) -> bool {
        self.features == 0 || feature_map & self.features != 0
    }
}

/// Command table of a cluster kind.
pub fn specs(kind: ClusterKind) -> &'static [CommandSpec] {
    match kind {
        ClusterKind::Identify => identify::COMMANDS,
        ClusterKind::OnOff => on_off::COMMANDS,
        ClusterKind::LevelControl => level_control::COMMANDS,
        ClusterKind::ColorControl => color_control::COMMANDS,
        ClusterKind::WindowCovering => window_covering::COMMANDS,
        ClusterKind::DoorLock => door_lock::COMMANDS,
        ClusterKind::FanControl => fan_control::COMMANDS,
        ClusterKind::Thermostat => thermostat::COMMANDS,
        ClusterKind::ValveConfigurationAndControl => valve::COMMANDS,
        ClusterKind::ModeSelect => modes::MODE_SELECT_COMMANDS,
        ClusterKind::RvcRunMode | ClusterKind::RvcCleanMode | ClusterKind::WaterHeaterMode => {
            modes::MODE_BASE_COMMANDS
        }
        ClusterKind::OperationalState => operational_state::COMMANDS,
        ClusterKind::RvcOperationalState => operational_state::RVC_COMMANDS,
        ClusterKind::ServiceArea => service_area::COMMANDS,
        ClusterKind::BooleanStateConfiguration => alarms::BOOLEAN_STATE_CONFIGURATION_COMMANDS,
        ClusterKind::SmokeCoAlarm => alarms::SMOKE_CO_ALARM_COMMANDS,
        ClusterKind::WaterHeaterManagement => water_heater::COMMANDS,
        _ => &[],
    }
}

/// Value of `acceptedCommandList`.
pub fn accepted_commands(behavior: BehaviorType) -> Vec<CommandId> {
    specs(behavior.kind)
        .iter()
        .filter(|spec| spec.enabled(behavior.feature_map))
        .map(|spec| spec.id)
        .collect()
}

/// Value of `generatedCommandList`.
pub fn generated_commands(behavior: BehaviorType) -> Vec<CommandId> {
    let mut ids: Vec<CommandId> = specs(behavior.kind)
        .iter()
        .filter(|spec| spec.enabled(behavior.feature_map))
        .filter_map(|spec| spec.response)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// An inbound cluster command with its typed request.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Identify(IdentifyCommand),
    OnOff(OnOffCommand),
    LevelControl(LevelControlCommand),
    ColorControl(ColorControlCommand),
    WindowCovering(WindowCoveringCommand),
    DoorLock(DoorLockCommand),
    FanControl(FanControlCommand),
    Thermostat(ThermostatCommand),
    Valve(ValveCommand),
    ModeSelect(ChangeToMode),
    RvcRunMode(ChangeToMode),
    RvcCleanMode(ChangeToMode),
    WaterHeaterMode(ChangeToMode),
    OperationalState(OperationalStateCommand),
    RvcOperationalState(RvcOperationalStateCommand),
    ServiceArea(ServiceAreaCommand),
    BooleanStateConfiguration(BooleanStateConfigurationCommand),
    SmokeCoAlarm(SmokeCoAlarmCommand),
    WaterHeaterManagement(WaterHeaterManagementCommand),
}

impl Command {
    /// Cluster the command addresses.
    pub fn cluster(&self) -> ClusterKind {
        match self {
            Self::Identify(_) => ClusterKind::Identify,
            Self::OnOff(_) => ClusterKind::OnOff,
            Self::LevelControl(_) => ClusterKind::LevelControl,
            Self::ColorControl(_) => ClusterKind::ColorControl,
            Self::WindowCovering(_) => ClusterKind::WindowCovering,
            Self::DoorLock(_) => ClusterKind::DoorLock,
            Self::FanControl(_) => ClusterKind::FanControl,
            Self::Thermostat(_) => ClusterKind::Thermostat,
            Self::Valve(_) => ClusterKind::ValveConfigurationAndControl,
            Self::ModeSelect(_) => ClusterKind::ModeSelect,
            Self::RvcRunMode(_) => ClusterKind::RvcRunMode,
            Self::RvcCleanMode(_) => ClusterKind::RvcCleanMode,
            Self::WaterHeaterMode(_) => ClusterKind::WaterHeaterMode,
            Self::OperationalState(_) => ClusterKind::OperationalState,
            Self::RvcOperationalState(_) => ClusterKind::RvcOperationalState,
            Self::ServiceArea(_) => ClusterKind::ServiceArea,
            Self::BooleanStateConfiguration(_) => ClusterKind::BooleanStateConfiguration,
            Self::SmokeCoAlarm(_) => ClusterKind::SmokeCoAlarm,
            Self::WaterHeaterManagement(_) => ClusterKind::WaterHeaterManagement,
        }
    }

    /// Operation name forwarded to the device handler.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Identify(cmd) => cmd.operation(),
            Self::OnOff(cmd) => cmd.operation(),
            Self::LevelControl(cmd) => cmd.operation(),
            Self::ColorControl(cmd) => cmd.operation(),
            Self::WindowCovering(cmd) => cmd.operation(),
            Self::DoorLock(cmd) => cmd.operation(),
            Self::FanControl(cmd) => cmd.operation(),
            Self::Thermostat(cmd) => cmd.operation(),
            Self::Valve(cmd) => cmd.operation(),
            Self::ModeSelect(_)
            | Self::RvcRunMode(_)
            | Self::RvcCleanMode(_)
            | Self::WaterHeaterMode(_) => modes::OPERATION,
            Self::OperationalState(cmd) => cmd.operation(),
            Self::RvcOperationalState(cmd) => cmd.operation(),
            Self::ServiceArea(cmd) => cmd.operation(),
            Self::BooleanStateConfiguration(cmd) => cmd.operation(),
            Self::SmokeCoAlarm(cmd) => cmd.operation(),
            Self::WaterHeaterManagement(cmd) => cmd.operation(),
        }
    }

    /// Request payload as sent to the handler.
    pub fn request(&self) -> Result<AttributeValue> {
        let value = match self {
            Self::Identify(cmd) => serde_json::to_value(cmd)?,
            Self::OnOff(cmd) => serde_json::to_value(cmd)?,
            Self::LevelControl(cmd) => serde_json::to_value(cmd)?,
            Self::ColorControl(cmd) => serde_json::to_value(cmd)?,
            Self::WindowCovering(cmd) => serde_json::to_value(cmd)?,
            Self::DoorLock(cmd) => serde_json::to_value(cmd)?,
            Self::FanControl(cmd) => serde_json::to_value(cmd)?,
            Self::Thermostat(cmd) => serde_json::to_value(cmd)?,
            Self::Valve(cmd) => serde_json::to_value(cmd)?,
            Self::ModeSelect(cmd)
            | Self::RvcRunMode(cmd)
            | Self::RvcCleanMode(cmd)
            | Self::WaterHeaterMode(cmd) => serde_json::to_value(cmd)?,
            Self::OperationalState(cmd) => serde_json::to_value(cmd)?,
            Self::RvcOperationalState(cmd) => serde_json::to_value(cmd)?,
            Self::ServiceArea(cmd) => serde_json::to_value(cmd)?,
            Self::BooleanStateConfiguration(cmd) => serde_json::to_value(cmd)?,
            Self::SmokeCoAlarm(cmd) => serde_json::to_value(cmd)?,
            Self::WaterHeaterManagement(cmd) => serde_json::to_value(cmd)?,
        };
        // Argument-less commands carry an empty request object
        if value.is_null() {
            return Ok(AttributeValue::Object(serde_json::Map::new()));
        }
        Ok(value)
    }
}

/// Protocol response of an intercepted command.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandResponse {
    /// Status-only commands
    None,
    ModeChange {
        status: ModeChangeStatus,
        #[serde(rename = "statusText")]
        status_text: Option<String>,
    },
    SelectAreas {
        status: SelectAreasStatus,
        #[serde(rename = "statusText")]
        status_text: Option<String>,
    },
    SkipArea {
        status: SkipAreaStatus,
        #[serde(rename = "statusText")]
        status_text: Option<String>,
    },
    Operational(OperationalCommandResponse),
}

/// Context of one command being intercepted.
pub(crate) struct Invocation<'a> {
    pub endpoint: &'a Endpoint,
    pub behavior: BehaviorType,
    pub operation: &'static str,
    pub request: AttributeValue,
}

impl Invocation<'_> {
    /// Forward to the device handler bound to the endpoint.
    pub async fn forward(&self) -> Result<()> {
        self.endpoint
            .forward(self.behavior.id(), self.operation, self.request.clone())
            .await
    }

    pub fn read<S: ClusterStateVariant, R>(&self, f: impl FnOnce(&S) -> R) -> Result<R> {
        self.endpoint.read_state(self.behavior.id(), f)
    }

    pub fn mutate<S: ClusterStateVariant, R>(&self, f: impl FnOnce(&mut S) -> R) -> Result<R> {
        self.endpoint.mutate_state(self.behavior.id(), f)
    }

    pub fn has_feature(&self, feature: u32) -> bool {
        self.behavior.has_feature(feature)
    }

    /// Forward, then mutate: the common shape of status-only commands.
    pub async fn forward_then<S: ClusterStateVariant>(
        &self,
        f: impl FnOnce(&mut S),
    ) -> Result<CommandResponse> {
        self.forward().await?;
        self.mutate(f)?;
        Ok(CommandResponse::None)
    }
}

/// Entry point for inbound cluster commands.
pub struct CommandInterceptor;

impl CommandInterceptor {
    /// Validate, forward and apply `command` on `endpoint`.
    pub async fn invoke(endpoint: &Endpoint, command: Command) -> Result<CommandResponse> {
        endpoint.ensure_active()?;
        let kind = command.cluster();
        let operation = command.operation();
        let behavior = endpoint.behavior_type(kind.id()).ok_or_else(|| {
            BridgeError::ClusterNotFound(kind.to_string(), endpoint.to_string())
        })?;
        if !specs(kind)
            .iter()
            .any(|spec| spec.name == operation && spec.enabled(behavior.feature_map))
        {
            return Err(BridgeError::UnsupportedCommand {
                cluster: kind.id(),
                command: operation.to_string(),
            });
        }

        let request = command.request()?;
        log::info!("[Matter] {} {}.{} {}", endpoint, kind, operation, request);

        let inv = Invocation {
            endpoint,
            behavior,
            operation,
            request,
        };
        match command {
            Command::Identify(cmd) => identify::handle(&inv, cmd).await,
            Command::OnOff(cmd) => on_off::handle(&inv, cmd).await,
            Command::LevelControl(cmd) => level_control::handle(&inv, cmd).await,
            Command::ColorControl(cmd) => color_control::handle(&inv, cmd).await,
            Command::WindowCovering(cmd) => window_covering::handle(&inv, cmd).await,
            Command::DoorLock(cmd) => door_lock::handle(&inv, cmd).await,
            Command::FanControl(cmd) => fan_control::handle(&inv, cmd).await,
            Command::Thermostat(cmd) => thermostat::handle(&inv, cmd).await,
            Command::Valve(cmd) => valve::handle(&inv, cmd).await,
            Command::ModeSelect(cmd) => modes::handle_mode_select(&inv, cmd).await,
            Command::RvcRunMode(cmd) => modes::handle_rvc_run(&inv, cmd).await,
            Command::RvcCleanMode(cmd) => modes::handle_rvc_clean(&inv, cmd).await,
            Command::WaterHeaterMode(cmd) => modes::handle_water_heater(&inv, cmd).await,
            Command::OperationalState(cmd) => operational_state::handle(&inv, cmd).await,
            Command::RvcOperationalState(cmd) => operational_state::handle_rvc(&inv, cmd).await,
            Command::ServiceArea(cmd) => service_area::handle(&inv, cmd).await,
            Command::BooleanStateConfiguration(cmd) => {
                alarms::handle_boolean_state_configuration(&inv, cmd).await
            }
            Command::SmokeCoAlarm(cmd) => alarms::handle_smoke_co_alarm(&inv, cmd).await,
            Command::WaterHeaterManagement(cmd) => water_heater::handle(&inv, cmd).await,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::matter::clusters::{OnOffState, on_off};
    use crate::matter::device_types;

    #[test]
    fn test_accepted_and_generated_lists() {
        assert_eq!(accepted_commands(BehaviorType::ON_OFF), vec![0x00, 0x01, 0x02]);
        assert_eq!(
            accepted_commands(BehaviorType::ON_OFF_LIGHTING),
            vec![0x00, 0x01, 0x02, 0x40, 0x42]
        );
        assert_eq!(generated_commands(BehaviorType::ON_OFF), Vec::<CommandId>::new());
        assert_eq!(generated_commands(BehaviorType::RVC_RUN_MODE), vec![0x01]);
        assert_eq!(generated_commands(BehaviorType::RVC_OPERATIONAL_STATE), vec![0x04]);
    }

    #[tokio::test]
    async fn test_unsupported_feature_is_rejected_before_forwarding() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ON_OFF_PLUG_IN_UNIT,
            vec![(BehaviorType::ON_OFF, OnOffState::default().into())],
        );
        let err = CommandInterceptor::invoke(
            &endpoint,
            Command::OnOff(OnOffCommand::OffWithEffect(on_off::OffWithEffectRequest {
                effect_identifier: 0,
                effect_variant: 0,
            })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedCommand { cluster: 0x0006, .. }));
        assert!(recorder.operations().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cluster() {
        let (endpoint, _) = endpoint_with(device_types::ON_OFF_PLUG_IN_UNIT, vec![]);
        let err = CommandInterceptor::invoke(&endpoint, Command::OnOff(OnOffCommand::On))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ClusterNotFound(..)));
    }

    #[tokio::test]
    async fn test_inactive_endpoint() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ON_OFF_PLUG_IN_UNIT,
            vec![(BehaviorType::ON_OFF, OnOffState::default().into())],
        );
        endpoint.destroy();
        let err = CommandInterceptor::invoke(&endpoint, Command::OnOff(OnOffCommand::On))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Lifecycle { .. }));
        assert!(recorder.operations().is_empty());
    }

    #[tokio::test]
    async fn test_handler_failure_leaves_state_untouched() {
        let (endpoint, _) = endpoint_with_recorder(
            device_types::ON_OFF_PLUG_IN_UNIT,
            vec![(BehaviorType::ON_OFF, OnOffState::default().into())],
            Recorder {
                fail: true,
                ..Default::default()
            },
        );
        let err = CommandInterceptor::invoke(&endpoint, Command::OnOff(OnOffCommand::On))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Handler(_)));
        assert!(!endpoint.read_state::<OnOffState, _>(0x0006, |s| s.on_off).unwrap());
    }

    #[tokio::test]
    async fn test_argument_less_commands_forward_empty_object() {
        assert_eq!(
            Command::WaterHeaterManagement(WaterHeaterManagementCommand::CancelBoost)
                .request()
                .unwrap(),
            serde_json::json!({})
        );
        assert_eq!(
            Command::Valve(valve::ValveCommand::Close).request().unwrap(),
            serde_json::json!({})
        );

        let (endpoint, recorder) = endpoint_with(
            device_types::ON_OFF_PLUG_IN_UNIT,
            vec![(BehaviorType::ON_OFF, OnOffState::default().into())],
        );
        CommandInterceptor::invoke(&endpoint, Command::OnOff(OnOffCommand::Toggle))
            .await
            .unwrap();
        assert_eq!(
            recorder.calls.lock().clone(),
            vec![("toggle".to_string(), serde_json::json!({}))]
        );
    }
}
