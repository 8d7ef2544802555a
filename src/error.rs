use rs_matter::dm::{AttrId, ClusterId};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum BridgeError {
    #[error("Cluster {0} is not attached to endpoint {1}")]
    ClusterNotFound(String, String),

    #[error("Attribute {attribute} does not exist on cluster {cluster}")]
    AttributeNotFound { cluster: String, attribute: String },

    #[error("Attribute {attribute} of cluster {cluster} is read-only")]
    ReadOnlyAttribute { cluster: String, attribute: String },

    #[error("Invalid value for attribute {attribute}: {reason}")]
    InvalidValue { attribute: String, reason: String },

    #[error("Endpoint {endpoint} is {state}, expected active")]
    Lifecycle { endpoint: String, state: String },

    #[error("Attribute {attribute} of cluster {cluster} has no change event")]
    NoChangeEvent { cluster: String, attribute: String },

    #[error("Command {command} is not supported by cluster 0x{cluster:04X}")]
    UnsupportedCommand { cluster: ClusterId, command: String },

    #[error("Device command handler failed: {0}")]
    Handler(String),

    #[error("No device command handler registered for {0}")]
    HandlerNotFound(String),

    #[error("Endpoint {0} is not bound to a device")]
    NotBound(String),

    #[error("Invalid device configuration: {0}")]
    Config(String),

    #[error("Unknown attribute id 0x{0:04X}")]
    UnknownAttributeId(AttrId),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
