//! BooleanState (0x0045) and BooleanStateConfiguration (0x0080) state.
//!
//! BooleanState carries the binary sensor value (contact, leak, freeze).
//! BooleanStateConfiguration adds alarm and sensitivity control on top.

/// Feature flags for BooleanStateConfiguration
pub mod features {
    pub const VISUAL: u32 = 0x01;
    pub const AUDIBLE: u32 = 0x02;
    pub const ALARM_SUPPRESS: u32 = 0x04;
    pub const SENSITIVITY_LEVEL: u32 = 0x08;
}

/// Alarm mode bits used by `alarmsActive`, `alarmsEnabled` and friends.
pub mod alarm_mode {
    pub const VISUAL: u8 = 0x01;
    pub const AUDIBLE: u8 = 0x02;
}

cluster_state! {
    pub struct BooleanStateState(BooleanStateAttribute) {
        0x0000 => StateValue("stateValue") state_value: bool,
    }
}

impl Default for BooleanStateState {
    fn default() -> Self {
        Self { state_value: false }
    }
}

cluster_state! {
    pub struct BooleanStateConfigurationState(BooleanStateConfigurationAttribute) {
        0x0000 => CurrentSensitivityLevel("currentSensitivityLevel") current_sensitivity_level: u8
            where features::SENSITIVITY_LEVEL,
        0x0001 => SupportedSensitivityLevels("supportedSensitivityLevels") supported_sensitivity_levels: u8
            where features::SENSITIVITY_LEVEL,
        0x0002 => DefaultSensitivityLevel("defaultSensitivityLevel") default_sensitivity_level: u8
            where features::SENSITIVITY_LEVEL,
        0x0003 => AlarmsActive("alarmsActive") alarms_active: u8
            where features::VISUAL | features::AUDIBLE,
        0x0004 => AlarmsSuppressed("alarmsSuppressed") alarms_suppressed: u8
            where features::ALARM_SUPPRESS,
        0x0005 => AlarmsEnabled("alarmsEnabled") alarms_enabled: u8
            where features::VISUAL | features::AUDIBLE,
        0x0006 => AlarmsSupported("alarmsSupported") alarms_supported: u8
            where features::VISUAL | features::AUDIBLE,
        0x0007 => SensorFault("sensorFault") sensor_fault: u16,
    }
}

impl BooleanStateConfigurationState {
    /// Apply an `enableDisableAlarm` mask. Bits outside `alarmsSupported` are
    /// ignored; disabled alarms stop being active or suppressed.
    pub fn enable_alarms(&mut self, mask: u8) {
        self.alarms_enabled = mask & self.alarms_supported;
        self.alarms_active &= self.alarms_enabled;
        self.alarms_suppressed &= self.alarms_enabled;
    }

    /// Apply a `suppressAlarm` request. Only active alarms can be suppressed.
    pub fn suppress_alarms(&mut self, mask: u8) {
        self.alarms_suppressed |= mask & self.alarms_active;
    }
}

impl Default for BooleanStateConfigurationState {
    fn default() -> Self {
        Self {
            current_sensitivity_level: 1,
            supported_sensitivity_levels: 2,
            default_sensitivity_level: 1,
            alarms_active: 0,
            alarms_suppressed: 0,
            alarms_enabled: alarm_mode::VISUAL | alarm_mode::AUDIBLE,
            alarms_supported: alarm_mode::VISUAL | alarm_mode::AUDIBLE,
            sensor_fault: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::ClusterAttribute;

    #[test]
    fn test_enable_masks_by_supported() {
        let mut config = BooleanStateConfigurationState {
            alarms_supported: alarm_mode::VISUAL,
            alarms_active: alarm_mode::VISUAL,
            ..Default::default()
        };
        config.enable_alarms(alarm_mode::VISUAL | alarm_mode::AUDIBLE);
        assert_eq!(config.alarms_enabled, alarm_mode::VISUAL);
        assert_eq!(config.alarms_active, alarm_mode::VISUAL);

        config.enable_alarms(0);
        assert_eq!(config.alarms_enabled, 0);
        assert_eq!(config.alarms_active, 0);
    }

    #[test]
    fn test_suppress_only_active() {
        let mut config = BooleanStateConfigurationState {
            alarms_active: alarm_mode::AUDIBLE,
            ..Default::default()
        };
        config.suppress_alarms(alarm_mode::VISUAL | alarm_mode::AUDIBLE);
        assert_eq!(config.alarms_suppressed, alarm_mode::AUDIBLE);
    }

    #[test]
    fn test_alarm_attributes_need_visual_or_audible() {
        assert!(BooleanStateConfigurationAttribute::AlarmsActive.enabled(features::AUDIBLE));
        let alarms = BooleanStateConfigurationAttribute::AlarmsActive;
        assert!(!alarms.enabled(features::SENSITIVITY_LEVEL));
        assert!(BooleanStateConfigurationAttribute::SensorFault.enabled(0));
    }
}
