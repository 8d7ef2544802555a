//! Matter side of the bridge.

pub mod attributes;
pub mod clusters;
pub mod commands;
pub mod device_types;
pub mod devices;
pub mod endpoints;
pub mod handler_bridge;
pub mod resolver;

pub use attributes::{
    attribute_id, get_attribute, set_attribute, subscribe_attribute, update_attribute,
};
pub use commands::{Command, CommandInterceptor, CommandResponse};
pub use endpoints::{CommandHandler, DeviceCommandHandler, Endpoint, EndpointIdentity};
pub use resolver::{ClusterResolver, DefaultClusterFactory, EndpointDefaults};
