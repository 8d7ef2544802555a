//! ColorControl cluster (0x0300) state.

use strum::FromRepr;

/// Feature flags for ColorControl
pub mod features {
    pub const HUE_SATURATION: u32 = 0x01;
    pub const ENHANCED_HUE: u32 = 0x02;
    pub const COLOR_LOOP: u32 = 0x04;
    pub const XY: u32 = 0x08;
    pub const COLOR_TEMPERATURE: u32 = 0x10;
}

/// ColorMode / EnhancedColorMode values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum ColorMode {
    CurrentHueAndCurrentSaturation = 0,
    CurrentXAndCurrentY = 1,
    ColorTemperatureMireds = 2,
}

cluster_state! {
    pub struct ColorControlState(ColorControlAttribute) {
        0x0000 => CurrentHue("currentHue") current_hue: u8 where features::HUE_SATURATION,
        0x0001 => CurrentSaturation("currentSaturation") current_saturation: u8
            where features::HUE_SATURATION,
        0x0002 => RemainingTime("remainingTime") remaining_time: u16,
        0x0003 => CurrentX("currentX") current_x: u16 where features::XY,
        0x0004 => CurrentY("currentY") current_y: u16 where features::XY,
        0x0007 => ColorTemperatureMireds("colorTemperatureMireds") color_temperature_mireds: u16
            where features::COLOR_TEMPERATURE,
        0x0008 => ColorMode("colorMode") color_mode: u8,
        0x000F => Options("options") options: u8,
        0x0010 => NumberOfPrimaries("numberOfPrimaries") number_of_primaries: Option<u8>,
        0x4001 => EnhancedColorMode("enhancedColorMode") enhanced_color_mode: u8,
        0x400A => ColorCapabilities("colorCapabilities") color_capabilities: u16,
        0x400B => ColorTempPhysicalMinMireds("colorTempPhysicalMinMireds") color_temp_physical_min_mireds: u16
            where features::COLOR_TEMPERATURE,
        0x400C => ColorTempPhysicalMaxMireds("colorTempPhysicalMaxMireds") color_temp_physical_max_mireds: u16
            where features::COLOR_TEMPERATURE,
        0x400D => CoupleColorTempToLevelMinMireds("coupleColorTempToLevelMinMireds") couple_color_temp_to_level_min_mireds: u16
            where features::COLOR_TEMPERATURE,
        0x4010 => StartUpColorTemperatureMireds("startUpColorTemperatureMireds") start_up_color_temperature_mireds: Option<u16>
            where features::COLOR_TEMPERATURE,
    }
}

impl ColorControlState {
    /// Record the mode the last color command drove the light into.
    pub fn set_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode as u8;
        self.enhanced_color_mode = mode as u8;
    }

    pub fn mode(&self) -> Option<ColorMode> {
        ColorMode::from_repr(self.color_mode)
    }

    /// Clamp mireds to the physical range of the lamp.
    pub fn clamp_mireds(&self, mireds: u16) -> u16 {
        mireds.clamp(
            self.color_temp_physical_min_mireds,
            self.color_temp_physical_max_mireds
                .max(self.color_temp_physical_min_mireds),
        )
    }
}

impl Default for ColorControlState {
    fn default() -> Self {
        Self {
            current_hue: 0,
            current_saturation: 0,
            remaining_time: 0,
            current_x: 0,
            current_y: 0,
            color_temperature_mireds: 250,
            color_mode: ColorMode::ColorTemperatureMireds as u8,
            options: 0,
            number_of_primaries: None,
            enhanced_color_mode: ColorMode::ColorTemperatureMireds as u8,
            // Bits: HS (0), XY (3), CT (4)
            color_capabilities: 0x19,
            color_temp_physical_min_mireds: 147,
            color_temp_physical_max_mireds: 500,
            couple_color_temp_to_level_min_mireds: 147,
            start_up_color_temperature_mireds: None,
        }
    }
}
