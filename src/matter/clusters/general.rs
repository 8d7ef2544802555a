//! Utility clusters every bridged endpoint carries: Identify (0x0003),
//! PowerSource (0x002F) and BridgedDeviceBasicInformation (0x0039).

use strum::FromRepr;

/// IdentifyType attribute values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum IdentifyType {
    None = 0,
    LightOutput = 1,
    VisibleIndicator = 2,
    AudibleBeep = 3,
    Display = 4,
    Actuator = 5,
}

/// TriggerEffect effect identifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum EffectIdentifier {
    Blink = 0x00,
    Breathe = 0x01,
    Okay = 0x02,
    ChannelChange = 0x0B,
    FinishEffect = 0xFE,
    StopEffect = 0xFF,
}

cluster_state! {
    pub struct IdentifyState(IdentifyAttribute) {
        /// Remaining identify time in seconds
        0x0000 => IdentifyTime("identifyTime") identify_time: u16,
        0x0001 => IdentifyType("identifyType") identify_type: u8,
    }
}

impl Default for IdentifyState {
    fn default() -> Self {
        Self {
            identify_time: 0,
            identify_type: IdentifyType::None as u8,
        }
    }
}

/// Feature flags for PowerSource
pub mod power_source_features {
    pub const WIRED: u32 = 0x01;
    pub const BATTERY: u32 = 0x02;
    pub const RECHARGEABLE: u32 = 0x04;
    pub const REPLACEABLE: u32 = 0x08;
}

/// PowerSourceStatus values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum PowerSourceStatus {
    Unspecified = 0,
    Active = 1,
    Standby = 2,
    Unavailable = 3,
}

/// WiredCurrentType values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum WiredCurrentType {
    Ac = 0,
    Dc = 1,
}

cluster_state! {
    pub struct PowerSourceState(PowerSourceAttribute) {
        0x0000 => Status("status") status: u8,
        0x0001 => Order("order") order: u8,
        0x0002 => Description("description") description: String,
        0x0005 => WiredCurrentType("wiredCurrentType") wired_current_type: u8
            where power_source_features::WIRED,
        /// Remaining battery in half percent (200 = 100 %)
        0x000C => BatPercentRemaining("batPercentRemaining") bat_percent_remaining: Option<u8>
            where power_source_features::BATTERY,
        0x000E => BatChargeLevel("batChargeLevel") bat_charge_level: u8
            where power_source_features::BATTERY,
        0x0013 => BatReplaceability("batReplaceability") bat_replaceability: u8
            where power_source_features::BATTERY,
        0x001F => EndpointList("endpointList") endpoint_list: Vec<u16>,
    }
}

impl PowerSourceState {
    /// Mains powered source.
    pub fn wired(current_type: WiredCurrentType) -> Self {
        Self {
            wired_current_type: current_type as u8,
            description: "AC Power".to_string(),
            ..Self::default()
        }
    }

    /// Battery powered source with a percentage in 0..=100.
    pub fn battery(percent: u8) -> Self {
        Self {
            description: "Primary battery".to_string(),
            bat_percent_remaining: Some(percent.min(100) * 2),
            ..Self::default()
        }
    }
}

impl Default for PowerSourceState {
    fn default() -> Self {
        Self {
            status: PowerSourceStatus::Active as u8,
            order: 0,
            description: "Primary power source".to_string(),
            wired_current_type: WiredCurrentType::Ac as u8,
            bat_percent_remaining: Some(200),
            bat_charge_level: 0,
            bat_replaceability: 0,
            endpoint_list: Vec::new(),
        }
    }
}

cluster_state! {
    /// Endpoint naming and reachability for bridged devices.
    pub struct BridgedDeviceBasicInformationState(BridgedDeviceBasicInformationAttribute) {
        0x0001 => VendorName("vendorName") vendor_name: String,
        0x0002 => VendorId("vendorId") vendor_id: u16,
        0x0003 => ProductName("productName") product_name: String,
        0x0005 => NodeLabel("nodeLabel") node_label: String,
        0x0007 => HardwareVersion("hardwareVersion") hardware_version: u16,
        0x0008 => HardwareVersionString("hardwareVersionString") hardware_version_string: String,
        0x0009 => SoftwareVersion("softwareVersion") software_version: u32,
        0x000A => SoftwareVersionString("softwareVersionString") software_version_string: String,
        0x000F => SerialNumber("serialNumber") serial_number: String,
        0x0011 => Reachable("reachable") reachable: bool,
        0x0012 => UniqueId("uniqueId") unique_id: String,
    }
}

impl BridgedDeviceBasicInformationState {
    /// Basic information for a device labelled `name` with the given serial.
    pub fn new(name: impl Into<String>, serial_number: impl Into<String>) -> Self {
        let serial_number = serial_number.into();
        Self {
            node_label: name.into(),
            unique_id: serial_number.clone(),
            serial_number,
            ..Self::default()
        }
    }

    pub fn with_vendor(mut self, vendor_id: u16, vendor_name: impl Into<String>) -> Self {
        self.vendor_id = vendor_id;
        self.vendor_name = vendor_name.into();
        self
    }

    pub fn with_product(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = product_name.into();
        self
    }
}

impl Default for BridgedDeviceBasicInformationState {
    fn default() -> Self {
        Self {
            vendor_name: "Plugin Matter Bridge".to_string(),
            vendor_id: 0xFFF1,
            product_name: "Bridged device".to_string(),
            node_label: "Bridged device".to_string(),
            hardware_version: 1,
            hardware_version_string: "1.0.0".to_string(),
            software_version: 1,
            software_version_string: "1.0.0".to_string(),
            serial_number: "0000000000".to_string(),
            reachable: true,
            unique_id: "0000000000".to_string(),
        }
    }
}
