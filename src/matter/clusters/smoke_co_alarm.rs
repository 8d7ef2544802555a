//! SmokeCoAlarm cluster (0x005C) state.

use strum::FromRepr;

/// Feature flags for SmokeCoAlarm
pub mod features {
    pub const SMOKE_ALARM: u32 = 0x01;
    pub const CO_ALARM: u32 = 0x02;
}

/// ExpressedState values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum ExpressedState {
    Normal = 0,
    SmokeAlarm = 1,
    CoAlarm = 2,
    BatteryAlert = 3,
    Testing = 4,
    HardwareFault = 5,
    EndOfService = 6,
    InterconnectSmoke = 7,
    InterconnectCo = 8,
}

/// AlarmState values used by smoke, CO and battery alerts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum AlarmState {
    Normal = 0,
    Warning = 1,
    Critical = 2,
}

cluster_state! {
    pub struct SmokeCoAlarmState(SmokeCoAlarmAttribute) {
        0x0000 => ExpressedState("expressedState") expressed_state: u8,
        0x0001 => SmokeState("smokeState") smoke_state: u8 where features::SMOKE_ALARM,
        0x0002 => CoState("coState") co_state: u8 where features::CO_ALARM,
        0x0003 => BatteryAlert("batteryAlert") battery_alert: u8,
        0x0004 => DeviceMuted("deviceMuted") device_muted: u8,
        0x0005 => TestInProgress("testInProgress") test_in_progress: bool,
        0x0006 => HardwareFaultAlert("hardwareFaultAlert") hardware_fault_alert: bool,
        0x0007 => EndOfServiceAlert("endOfServiceAlert") end_of_service_alert: u8,
        0x0008 => InterconnectSmokeAlarm("interconnectSmokeAlarm") interconnect_smoke_alarm: u8
            where features::SMOKE_ALARM,
        0x0009 => InterconnectCoAlarm("interconnectCoAlarm") interconnect_co_alarm: u8
            where features::CO_ALARM,
        0x000A => ContaminationState("contaminationState") contamination_state: u8
            where features::SMOKE_ALARM,
        0x000B => SmokeSensitivityLevel("smokeSensitivityLevel") smoke_sensitivity_level: u8
            where features::SMOKE_ALARM,
    }
}

impl Default for SmokeCoAlarmState {
    fn default() -> Self {
        Self {
            expressed_state: ExpressedState::Normal as u8,
            smoke_state: AlarmState::Normal as u8,
            co_state: AlarmState::Normal as u8,
            battery_alert: AlarmState::Normal as u8,
            device_muted: 0,
            test_in_progress: false,
            hardware_fault_alert: false,
            end_of_service_alert: 0,
            interconnect_smoke_alarm: AlarmState::Normal as u8,
            interconnect_co_alarm: AlarmState::Normal as u8,
            contamination_state: 0,
            // Standard
            smoke_sensitivity_level: 1,
        }
    }
}
