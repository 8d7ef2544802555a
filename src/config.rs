use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load environment variables from a `.env` file.
/// Values may contain spaces without quotes; variables already set win.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    if !env_path.exists() {
        return;
    }

    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(err) => {
            log::warn!("[Config] Ignoring unreadable .env: {}", err);
            return;
        }
    };

    for (key, value) in parse_dotenv(&content) {
        if std::env::var(key).is_err() {
            // SAFETY: called from main before the runtime starts other threads
            unsafe { std::env::set_var(key, value) };
        }
    }
}

/// `KEY=value` pairs of a dotenv file; comments and blank lines skipped.
fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Some((key.trim(), unquoted))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matter: MatterConfig,
    pub water_heater: WaterHeaterConfig,
    pub vacuum: VacuumConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatterConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub vendor_name: String,
    pub device_name: String,
}

/// Initial values of the water heater, temperatures in degrees Celsius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterHeaterConfig {
    pub name: String,
    pub water_temperature: f32,
    pub target_temperature: f32,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub tank_percentage: u8,
    /// Mode selected at startup (1 Auto .. 6 Timed)
    pub initial_mode: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacuumConfig {
    pub name: String,
    pub areas: Vec<String>,
}

impl Default for WaterHeaterConfig {
    fn default() -> Self {
        Self {
            name: "Water Heater".to_string(),
            water_temperature: 50.0,
            target_temperature: 50.0,
            min_temperature: 20.0,
            max_temperature: 80.0,
            tank_percentage: 90,
            initial_mode: 1,
        }
    }
}

impl Default for VacuumConfig {
    fn default() -> Self {
        Self {
            name: "Robot Vacuum".to_string(),
            areas: ["Living", "Kitchen", "Bedroom", "Bathroom"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matter: MatterConfig {
                vendor_id: 0xFFF1,
                product_id: 0x8001,
                vendor_name: "Plugin Bridge".to_string(),
                device_name: "Plugin Matter Bridge".to_string(),
            },
            water_heater: WaterHeaterConfig::default(),
            vacuum: VacuumConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("[Config] Ignoring {}={}: not a valid value", key, value);
            None
        }
    }
}

fn parse_hex_or_decimal(value: &str) -> Option<u16> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("DEVICE_NAME") {
            config.matter.device_name = name;
        }
        if let Ok(vendor_id) = std::env::var("MATTER_VENDOR_ID")
            && let Some(id) = parse_hex_or_decimal(&vendor_id)
        {
            config.matter.vendor_id = id;
        }
        if let Ok(product_id) = std::env::var("MATTER_PRODUCT_ID")
            && let Some(id) = parse_hex_or_decimal(&product_id)
        {
            config.matter.product_id = id;
        }
        if let Ok(vendor_name) = std::env::var("MATTER_VENDOR_NAME") {
            config.matter.vendor_name = vendor_name;
        }

        // Water heater
        if let Ok(name) = std::env::var("WATER_HEATER_NAME") {
            config.water_heater.name = name;
        }
        if let Some(t) = env_parse("WATER_HEATER_TEMPERATURE") {
            config.water_heater.water_temperature = t;
        }
        if let Some(t) = env_parse("WATER_HEATER_TARGET") {
            config.water_heater.target_temperature = t;
        }
        if let Some(t) = env_parse("WATER_HEATER_MIN") {
            config.water_heater.min_temperature = t;
        }
        if let Some(t) = env_parse("WATER_HEATER_MAX") {
            config.water_heater.max_temperature = t;
        }
        if let Some(p) = env_parse("WATER_HEATER_TANK_PERCENT") {
            config.water_heater.tank_percentage = p;
        }
        if let Some(mode) = env_parse("WATER_HEATER_MODE") {
            config.water_heater.initial_mode = mode;
        }

        // Robot vacuum
        if let Ok(name) = std::env::var("VACUUM_NAME") {
            config.vacuum.name = name;
        }
        if let Ok(areas) = std::env::var("VACUUM_AREAS") {
            config.vacuum.areas = areas
                .split(',')
                .map(str::trim)
                .filter(|area| !area.is_empty())
                .map(String::from)
                .collect();
        }

        config
    }
}
