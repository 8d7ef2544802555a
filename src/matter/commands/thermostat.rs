//! Thermostat commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::ThermostatState;
use crate::matter::clusters::thermostat::{SetpointRaiseLowerMode, features};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[CommandSpec::new(0x00, "setpointRaiseLower")];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetpointRaiseLowerRequest {
    pub mode: SetpointRaiseLowerMode,
    /// Tenths of a degree
    pub amount: i8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ThermostatCommand {
    SetpointRaiseLower(SetpointRaiseLowerRequest),
}

impl ThermostatCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::SetpointRaiseLower(_) => "setpointRaiseLower",
        }
    }
}

fn shifted(setpoint: i16, amount: i8, (min, max): (i16, i16)) -> i16 {
    let value = i32::from(setpoint) + i32::from(amount) * 10;
    value.clamp(i32::from(min), i32::from(max.max(min))) as i16
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: ThermostatCommand,
) -> Result<CommandResponse> {
    let heating = inv.has_feature(features::HEATING);
    let cooling = inv.has_feature(features::COOLING);
    match cmd {
        ThermostatCommand::SetpointRaiseLower(req) => {
            let heat = heating
                && matches!(req.mode, SetpointRaiseLowerMode::Heat | SetpointRaiseLowerMode::Both);
            let cool = cooling
                && matches!(req.mode, SetpointRaiseLowerMode::Cool | SetpointRaiseLowerMode::Both);
            inv.forward_then(|s: &mut ThermostatState| {
                if heat {
                    s.occupied_heating_setpoint =
                        shifted(s.occupied_heating_setpoint, req.amount, s.heat_limits());
                }
                if cool {
                    s.occupied_cooling_setpoint =
                        shifted(s.occupied_cooling_setpoint, req.amount, s.cool_limits());
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
    use crate::matter::endpoints::Endpoint;

    async fn raise(endpoint: &Endpoint, mode: SetpointRaiseLowerMode, amount: i8) {
        CommandInterceptor::invoke(
            endpoint,
            Command::Thermostat(ThermostatCommand::SetpointRaiseLower(
                SetpointRaiseLowerRequest { mode, amount },
            )),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_raise_lower_both() {
        let (endpoint, recorder) = endpoint_with(
            device_types::THERMOSTAT,
            vec![(BehaviorType::THERMOSTAT_AUTO, ThermostatState::default().into())],
        );
        raise(&endpoint, SetpointRaiseLowerMode::Both, -5).await;
        let (heat, cool) = endpoint
            .read_state::<ThermostatState, _>(0x0201, |s| {
                (s.occupied_heating_setpoint, s.occupied_cooling_setpoint)
            })
            .unwrap();
        assert_eq!((heat, cool), (2050, 2450));
        assert_eq!(
            recorder.calls.lock()[0].1,
            serde_json::json!({"mode": "both", "amount": -5})
        );
    }

    #[tokio::test]
    async fn test_raise_heat_leaves_cooling() {
        let (endpoint, recorder) = endpoint_with(
            device_types::THERMOSTAT,
            vec![(BehaviorType::THERMOSTAT_AUTO, ThermostatState::default().into())],
        );
        raise(&endpoint, SetpointRaiseLowerMode::Heat, 5).await;
        let (heat, cool) = endpoint
            .read_state::<ThermostatState, _>(0x0201, |s| {
                (s.occupied_heating_setpoint, s.occupied_cooling_setpoint)
            })
            .unwrap();
        assert_eq!((heat, cool), (2150, 2500));
        assert_eq!(recorder.operations(), vec!["setpointRaiseLower"]);
    }

    #[tokio::test]
    async fn test_raise_clamps_to_limits() {
        let (endpoint, _) = endpoint_with(
            device_types::THERMOSTAT,
            vec![(
                BehaviorType::THERMOSTAT_HEATING,
                ThermostatState::heating(20.0, 29.0, 10.0, 30.0).into(),
            )],
        );
        raise(&endpoint, SetpointRaiseLowerMode::Heat, 50).await;
        assert_eq!(
            endpoint
                .read_state::<ThermostatState, _>(0x0201, |s| s.occupied_heating_setpoint)
                .unwrap(),
            3000
        );
        // Cooling is not a feature here: nothing to move
        raise(&endpoint, SetpointRaiseLowerMode::Cool, -50).await;
        assert_eq!(
            endpoint
                .read_state::<ThermostatState, _>(0x0201, |s| s.occupied_cooling_setpoint)
                .unwrap(),
            2500
        );
    }
}
