//! Demo host for the plugin bridge.
//!
//! Builds a water heater and a robot vacuum from configuration, binds a
//! logging command handler to both, and replays a scripted sequence of
//! controller commands, printing cluster snapshots as JSON.

use clap::{Parser, ValueEnum};
use embassy_sync::signal::Signal;
use log::{error, info};
use plugin_matter_bridge::config::{Config, load_dotenv};
use plugin_matter_bridge::error::Result;
use plugin_matter_bridge::matter::clusters::ClusterKind;
use plugin_matter_bridge::matter::clusters::thermostat::SetpointRaiseLowerMode;
use plugin_matter_bridge::matter::clusters::water_heater::BoostInfo;
use plugin_matter_bridge::matter::commands::service_area::SelectAreasRequest;
use plugin_matter_bridge::matter::commands::thermostat::SetpointRaiseLowerRequest;
use plugin_matter_bridge::matter::commands::water_heater::BoostRequest;
use plugin_matter_bridge::matter::commands::{
    ChangeToMode, Command, CommandInterceptor, RvcOperationalStateCommand, ServiceAreaCommand,
    ThermostatCommand, WaterHeaterManagementCommand,
};
use plugin_matter_bridge::matter::devices::{robot_vacuum, water_heater};
use plugin_matter_bridge::matter::endpoints::{
    ChangeSignal, ClusterBehavior, ClusterNotifier, CommandHandler, Endpoint, EndpointIdentity,
    HandlerData,
};
use plugin_matter_bridge::matter::{ClusterResolver, subscribe_attribute};
use rs_matter::dm::EndptId;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Wakes the (simulated) subscription processor after attribute changes.
static CHANGES: ChangeSignal = Signal::new();

/// Operations the demo plugin accepts.
const OPERATIONS: &[&str] = &[
    "setpointRaiseLower",
    "boost",
    "cancelBoost",
    "changeToMode",
    "selectAreas",
    "skipArea",
    "pause",
    "resume",
    "goHome",
    "identify",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    WaterHeater,
    Vacuum,
    All,
}

#[derive(Parser)]
#[command(name = "plugin-matter-bridge")]
#[command(about = "Run scripted controller commands against bridged plugin devices")]
struct Cli {
    /// Which device script to run
    #[arg(long, value_enum, env = "BRIDGE_DEMO", default_value_t = Demo::All)]
    demo: Demo,

    /// Pretty-print attribute snapshots
    #[arg(long, env = "BRIDGE_PRETTY")]
    pretty: bool,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

/// Plugin handler that only logs what it is asked to do.
fn logging_handler() -> Arc<CommandHandler> {
    let handler = CommandHandler::new();
    for &operation in OPERATIONS {
        handler.add_handler(operation, move |data: HandlerData| async move {
            info!(
                "[Plugin] {} on #{} ({}): {}",
                operation, data.endpoint.number, data.endpoint.unique_storage_key, data.request
            );
            Ok(())
        });
    }
    Arc::new(handler)
}

/// Register `endpoint` as `number` and bind the plugin handler.
fn register(
    endpoint: &Endpoint,
    number: EndptId,
    handler: Arc<CommandHandler>,
    config: &Config,
) -> Result<()> {
    let key = format!(
        "{:04x}-{:04x}-{}",
        config.matter.vendor_id,
        config.matter.product_id,
        endpoint.name().to_lowercase().replace(' ', "-")
    );
    endpoint.activate(EndpointIdentity::new(key, number))?;
    endpoint.set_notifier(ClusterNotifier::new(&CHANGES, number));
    endpoint.bind_device(handler, Arc::new(config.clone()))
}

/// Every attached cluster's attributes, keyed by cluster name.
fn snapshot(endpoint: &Endpoint) -> Result<Value> {
    let mut clusters = Map::new();
    for id in endpoint.cluster_ids() {
        let name = ClusterKind::from_id(id)
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| format!("0x{:04X}", id));
        clusters.insert(name, endpoint.with_behavior(id, ClusterBehavior::attributes_json)?);
    }
    Ok(Value::Object(clusters))
}

fn print_snapshot(endpoint: &Endpoint, pretty: bool) -> Result<()> {
    let value = snapshot(endpoint)?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}: {}", endpoint, text);
    Ok(())
}

async fn invoke(endpoint: &Endpoint, command: Command) -> Result<()> {
    let response = CommandInterceptor::invoke(endpoint, command).await?;
    info!("[Demo] {} -> {:?}", endpoint, response);
    Ok(())
}

async fn water_heater_script(
    config: &Config,
    resolver: &ClusterResolver,
    handler: Arc<CommandHandler>,
    pretty: bool,
) -> Result<()> {
    let heater = water_heater::build(&config.water_heater, resolver)?;
    register(&heater, 2, handler, config)?;

    subscribe_attribute(
        &heater,
        ClusterKind::WaterHeaterManagement,
        "boostState",
        |change| info!("[Demo] {} boostState {} -> {}", change.endpoint, change.old, change.new),
    )
    .await;
    print_snapshot(&heater, pretty)?;

    invoke(
        &heater,
        Command::Thermostat(ThermostatCommand::SetpointRaiseLower(
            SetpointRaiseLowerRequest {
                mode: SetpointRaiseLowerMode::Heat,
                amount: 50,
            },
        )),
    )
    .await?;
    invoke(
        &heater,
        Command::WaterHeaterManagement(WaterHeaterManagementCommand::Boost(BoostRequest {
            boost_info: BoostInfo {
                duration: 1800,
                ..Default::default()
            },
        })),
    )
    .await?;
    invoke(&heater, Command::WaterHeaterMode(ChangeToMode { new_mode: 2 })).await?;
    water_heater::report_water_temperature(&heater, 54.5);
    invoke(
        &heater,
        Command::WaterHeaterManagement(WaterHeaterManagementCommand::CancelBoost),
    )
    .await?;
    // Unsupported mode: rejected without reaching the plugin
    invoke(&heater, Command::WaterHeaterMode(ChangeToMode { new_mode: 42 })).await?;

    print_snapshot(&heater, pretty)
}

async fn vacuum_script(
    config: &Config,
    resolver: &ClusterResolver,
    handler: Arc<CommandHandler>,
    pretty: bool,
) -> Result<()> {
    let vacuum = robot_vacuum::build(&config.vacuum, resolver)?;
    register(&vacuum, 3, handler, config)?;
    print_snapshot(&vacuum, pretty)?;

    invoke(
        &vacuum,
        Command::ServiceArea(ServiceAreaCommand::SelectAreas(SelectAreasRequest {
            new_areas: vec![1, 2],
        })),
    )
    .await?;
    invoke(&vacuum, Command::RvcRunMode(ChangeToMode { new_mode: 2 })).await?;
    invoke(
        &vacuum,
        Command::RvcOperationalState(RvcOperationalStateCommand::Pause),
    )
    .await?;
    invoke(
        &vacuum,
        Command::RvcOperationalState(RvcOperationalStateCommand::Resume),
    )
    .await?;
    invoke(
        &vacuum,
        Command::RvcOperationalState(RvcOperationalStateCommand::GoHome),
    )
    .await?;

    print_snapshot(&vacuum, pretty)
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let resolver = ClusterResolver::new()
        .with_vendor(config.matter.vendor_id, config.matter.vendor_name.clone());
    let handler = logging_handler();

    tokio::spawn(async {
        loop {
            CHANGES.wait().await;
            log::debug!("[Demo] Subscription processor woken");
        }
    });

    if matches!(cli.demo, Demo::WaterHeater | Demo::All) {
        water_heater_script(&config, &resolver, handler.clone(), cli.pretty).await?;
    }
    if matches!(cli.demo, Demo::Vacuum | Demo::All) {
        vacuum_script(&config, &resolver, handler, cli.pretty).await?;
    }
    Ok(())
}

fn main() {
    // Before the runtime exists: `load_dotenv` mutates the environment
    load_dotenv();
    let cli = Cli::parse();
    init_logger();
    info!("Starting Plugin Matter Bridge demo");

    let config = Config::from_env();
    info!("Configuration loaded:");
    info!("  Device Name: {}", config.matter.device_name);
    info!("  Vendor ID: 0x{:04X}", config.matter.vendor_id);
    info!("  Product ID: 0x{:04X}", config.matter.product_id);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to start tokio runtime: {}", err);
            std::process::exit(1);
        }
    };
    if let Err(err) = runtime.block_on(run(cli, config)) {
        error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}
