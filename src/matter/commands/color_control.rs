//! ColorControl commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::ColorControlState;
use crate::matter::clusters::color_control::{ColorMode, features};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "moveToHue").requires(features::HUE_SATURATION),
    CommandSpec::new(0x03, "moveToSaturation").requires(features::HUE_SATURATION),
    CommandSpec::new(0x06, "moveToHueAndSaturation").requires(features::HUE_SATURATION),
    CommandSpec::new(0x07, "moveToColor").requires(features::XY),
    CommandSpec::new(0x0A, "moveToColorTemperature").requires(features::COLOR_TEMPERATURE),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToHueRequest {
    pub hue: u8,
    #[serde(default)]
    pub direction: u8,
    #[serde(default)]
    pub transition_time: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToSaturationRequest {
    pub saturation: u8,
    #[serde(default)]
    pub transition_time: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToHueAndSaturationRequest {
    pub hue: u8,
    pub saturation: u8,
    #[serde(default)]
    pub transition_time: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToColorRequest {
    pub color_x: u16,
    pub color_y: u16,
    #[serde(default)]
    pub transition_time: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToColorTemperatureRequest {
    pub color_temperature_mireds: u16,
    #[serde(default)]
    pub transition_time: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorControlCommand {
    MoveToHue(MoveToHueRequest),
    MoveToSaturation(MoveToSaturationRequest),
    MoveToHueAndSaturation(MoveToHueAndSaturationRequest),
    MoveToColor(MoveToColorRequest),
    MoveToColorTemperature(MoveToColorTemperatureRequest),
}

impl ColorControlCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::MoveToHue(_) => "moveToHue",
            Self::MoveToSaturation(_) => "moveToSaturation",
            Self::MoveToHueAndSaturation(_) => "moveToHueAndSaturation",
            Self::MoveToColor(_) => "moveToColor",
            Self::MoveToColorTemperature(_) => "moveToColorTemperature",
        }
    }
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: ColorControlCommand,
) -> Result<CommandResponse> {
    inv.forward_then(|s: &mut ColorControlState| match cmd {
        ColorControlCommand::MoveToHue(req) => {
            s.current_hue = req.hue;
            s.set_mode(ColorMode::CurrentHueAndCurrentSaturation);
        }
        ColorControlCommand::MoveToSaturation(req) => {
            s.current_saturation = req.saturation;
            s.set_mode(ColorMode::CurrentHueAndCurrentSaturation);
        }
        ColorControlCommand::MoveToHueAndSaturation(req) => {
            s.current_hue = req.hue;
            s.current_saturation = req.saturation;
            s.set_mode(ColorMode::CurrentHueAndCurrentSaturation);
        }
        ColorControlCommand::MoveToColor(req) => {
            s.current_x = req.color_x;
            s.current_y = req.color_y;
            s.set_mode(ColorMode::CurrentXAndCurrentY);
        }
        ColorControlCommand::MoveToColorTemperature(req) => {
            s.color_temperature_mireds = s.clamp_mireds(req.color_temperature_mireds);
            s.set_mode(ColorMode::ColorTemperatureMireds);
        }
    })
    .await
}
