//! Matter endpoints and what hangs off them.
//!
//! - `endpoint`: identity, lifecycle and the behavior store
//! - `behavior`: one attached cluster with its listeners
//! - `handler`: the plugin-facing command handler trait and registry
//! - `notifier`: wake-up for the runtime's subscription processor

pub mod behavior;
pub mod endpoint;
pub mod handler;
pub mod notifier;

pub use behavior::{AttributeChange, ChangeListener, ClusterBehavior};
pub use endpoint::{Endpoint, EndpointIdentity, Lifecycle};
pub use handler::{CommandHandler, DeviceCommandHandler, EndpointContext, HandlerData};
pub use notifier::{ChangeSignal, ClusterNotifier};
