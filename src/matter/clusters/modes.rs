//! Mode clusters: ModeSelect (0x0050) and the mode-base derived RvcRunMode
//! (0x0054), RvcCleanMode (0x0055) and WaterHeaterMode (0x009E).

use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Feature flags for ModeSelect
pub mod features {
    pub const ON_OFF: u32 = 0x01;
}

/// Mode tag values shared by every mode-base cluster.
pub mod common_tags {
    pub const AUTO: u16 = 0x0000;
    pub const QUICK: u16 = 0x0001;
    pub const QUIET: u16 = 0x0002;
    pub const LOW_NOISE: u16 = 0x0003;
    pub const LOW_ENERGY: u16 = 0x0004;
    pub const VACATION: u16 = 0x0005;
    pub const MIN: u16 = 0x0006;
    pub const MAX: u16 = 0x0007;
    pub const NIGHT: u16 = 0x0008;
    pub const DAY: u16 = 0x0009;
}

/// RvcRunMode specific tags.
pub mod rvc_run_tags {
    pub const IDLE: u16 = 0x4000;
    pub const CLEANING: u16 = 0x4001;
    pub const MAPPING: u16 = 0x4002;
}

/// RvcCleanMode specific tags.
pub mod rvc_clean_tags {
    pub const DEEP_CLEAN: u16 = 0x4000;
    pub const VACUUM: u16 = 0x4001;
    pub const MOP: u16 = 0x4002;
}

/// WaterHeaterMode specific tags.
pub mod water_heater_tags {
    pub const OFF: u16 = 0x4000;
    pub const MANUAL: u16 = 0x4001;
    pub const TIMED: u16 = 0x4002;
}

/// Status codes of a `changeToModeResponse`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr, Serialize, Deserialize)]
#[repr(u8)]
pub enum ModeChangeStatus {
    Success = 0x00,
    UnsupportedMode = 0x01,
    GenericFailure = 0x02,
    InvalidInMode = 0x03,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeTagValue {
    pub mfg_code: Option<u16>,
    pub value: u16,
}

impl ModeTagValue {
    pub const fn standard(value: u16) -> Self {
        Self {
            mfg_code: None,
            value,
        }
    }
}

/// Entry of a mode-base `supportedModes` list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeOption {
    pub label: String,
    pub mode: u8,
    pub mode_tags: Vec<ModeTagValue>,
}

impl ModeOption {
    pub fn new(label: impl Into<String>, mode: u8, tags: &[u16]) -> Self {
        Self {
            label: label.into(),
            mode,
            mode_tags: tags.iter().copied().map(ModeTagValue::standard).collect(),
        }
    }

    pub fn has_tag(&self, tag: u16) -> bool {
        self.mode_tags.iter().any(|t| t.value == tag)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTag {
    pub mfg_code: Option<u16>,
    pub value: u16,
}

/// Entry of ModeSelect's `supportedModes` list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeSelectOption {
    pub label: String,
    pub mode: u8,
    pub semantic_tags: Vec<SemanticTag>,
}

impl ModeSelectOption {
    pub fn new(label: impl Into<String>, mode: u8) -> Self {
        Self {
            label: label.into(),
            mode,
            semantic_tags: Vec::new(),
        }
    }
}

/// Common view of the four mode clusters used by `changeToMode`.
pub trait ModeBase {
    fn supports_mode(&self, mode: u8) -> bool;

    fn current_mode(&self) -> u8;

    fn set_current_mode(&mut self, mode: u8);
}

cluster_state! {
    pub struct ModeSelectState(ModeSelectAttribute) {
        0x0000 => Description("description") description: String,
        0x0001 => StandardNamespace("standardNamespace") standard_namespace: Option<u16>,
        0x0002 => SupportedModes("supportedModes") supported_modes: Vec<ModeSelectOption>,
        0x0003 => CurrentMode("currentMode") current_mode: u8,
        0x0004 => StartUpMode("startUpMode") start_up_mode: Option<u8>,
        0x0005 => OnMode("onMode") on_mode: Option<u8> where features::ON_OFF,
    }
}

impl ModeSelectState {
    pub fn new(description: impl Into<String>, modes: Vec<ModeSelectOption>) -> Self {
        let current_mode = modes.first().map(|m| m.mode).unwrap_or_default();
        Self {
            description: description.into(),
            standard_namespace: None,
            supported_modes: modes,
            current_mode,
            start_up_mode: None,
            on_mode: None,
        }
    }
}

impl Default for ModeSelectState {
    fn default() -> Self {
        Self::new(
            "Mode",
            vec![
                ModeSelectOption::new("Normal", 0),
                ModeSelectOption::new("Eco", 1),
            ],
        )
    }
}

impl ModeBase for ModeSelectState {
    fn supports_mode(&self, mode: u8) -> bool {
        self.supported_modes.iter().any(|m| m.mode == mode)
    }

    fn current_mode(&self) -> u8 {
        self.current_mode
    }

    fn set_current_mode(&mut self, mode: u8) {
        self.current_mode = mode;
    }
}

/// Mode-base clusters share one schema: `supportedModes` (0) and
/// `currentMode` (1).
macro_rules! mode_base_state {
    ($state:ident($attr:ident)) => {
        cluster_state! {
            pub struct $state($attr) {
                0x0000 => SupportedModes("supportedModes") supported_modes: Vec<ModeOption>,
                0x0001 => CurrentMode("currentMode") current_mode: u8,
            }
        }

        impl $state {
            pub fn new(supported_modes: Vec<ModeOption>, current_mode: u8) -> Self {
                Self {
                    supported_modes,
                    current_mode,
                }
            }

            /// The `supportedModes` entry for `mode`.
            pub fn option(&self, mode: u8) -> Option<&ModeOption> {
                self.supported_modes.iter().find(|m| m.mode == mode)
            }

            /// First mode carrying `tag`.
            pub fn mode_with_tag(&self, tag: u16) -> Option<u8> {
                self.supported_modes
                    .iter()
                    .find(|m| m.has_tag(tag))
                    .map(|m| m.mode)
            }
        }

        impl ModeBase for $state {
            fn supports_mode(&self, mode: u8) -> bool {
                self.option(mode).is_some()
            }

            fn current_mode(&self) -> u8 {
                self.current_mode
            }

            fn set_current_mode(&mut self, mode: u8) {
                self.current_mode = mode;
            }
        }
    };
}

mode_base_state!(RvcRunModeState(RvcRunModeAttribute));
mode_base_state!(RvcCleanModeState(RvcCleanModeAttribute));
mode_base_state!(WaterHeaterModeState(WaterHeaterModeAttribute));

impl Default for RvcRunModeState {
    fn default() -> Self {
        Self::new(
            vec![
                ModeOption::new("Idle", 1, &[rvc_run_tags::IDLE]),
                ModeOption::new("Cleaning", 2, &[rvc_run_tags::CLEANING]),
                ModeOption::new("Mapping", 3, &[rvc_run_tags::MAPPING]),
            ],
            1,
        )
    }
}

impl Default for RvcCleanModeState {
    fn default() -> Self {
        Self::new(
            vec![
                ModeOption::new("Vacuum", 1, &[rvc_clean_tags::VACUUM]),
                ModeOption::new("Mop", 2, &[rvc_clean_tags::MOP]),
                ModeOption::new(
                    "Vacuum & Mop",
                    3,
                    &[rvc_clean_tags::VACUUM, rvc_clean_tags::MOP],
                ),
            ],
            1,
        )
    }
}

impl Default for WaterHeaterModeState {
    fn default() -> Self {
        Self::new(
            vec![
                ModeOption::new("Auto", 1, &[common_tags::AUTO]),
                ModeOption::new("Quick", 2, &[common_tags::QUICK]),
                ModeOption::new("Quiet", 3, &[common_tags::QUIET]),
                ModeOption::new("Off", 4, &[water_heater_tags::OFF]),
                ModeOption::new("Manual", 5, &[water_heater_tags::MANUAL]),
                ModeOption::new("Timed", 6, &[water_heater_tags::TIMED]),
            ],
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::AttributeAccess;

    #[test]
    fn test_mode_option_wire_shape() {
        let option = ModeOption::new("Cleaning", 2, &[rvc_run_tags::CLEANING]);
        assert_eq!(
            serde_json::to_value(&option).unwrap(),
            serde_json::json!({
                "label": "Cleaning",
                "mode": 2,
                "modeTags": [{ "mfgCode": null, "value": 0x4001 }]
            })
        );
    }

    #[test]
    fn test_tag_lookup() {
        let run = RvcRunModeState::default();
        assert_eq!(run.mode_with_tag(rvc_run_tags::CLEANING), Some(2));
        assert_eq!(run.mode_with_tag(rvc_run_tags::IDLE), Some(1));
        assert_eq!(run.mode_with_tag(common_tags::QUIET), None);

        let clean = RvcCleanModeState::default();
        assert!(clean.option(3).is_some_and(|m| m.has_tag(rvc_clean_tags::MOP)));
    }

    #[test]
    fn test_water_heater_modes() {
        let modes = WaterHeaterModeState::default();
        assert_eq!(modes.current_mode, 1);
        assert!(modes.supports_mode(6));
        assert!(!modes.supports_mode(7));
        assert_eq!(
            modes.get_by_name("currentMode", 0),
            Some(serde_json::json!(1))
        );
    }
}
