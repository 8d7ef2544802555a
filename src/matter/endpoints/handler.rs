//! Device command handlers supplied by plugins.
//!
//! The bridge never talks to device hardware itself. Every intercepted
//! command is forwarded to a [`DeviceCommandHandler`] as an operation name
//! plus a [`HandlerData`] payload; the plugin decides what to do with it.

use crate::error::{BridgeError, Result};
use crate::matter::clusters::AttributeValue;
use async_trait::async_trait;
use parking_lot::RwLock;
use rs_matter::dm::EndptId;
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Endpoint context sent with every forwarded command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointContext {
    pub number: EndptId,
    pub unique_storage_key: String,
}

/// Payload of a forwarded command.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerData {
    /// Typed command request as JSON (`{}` for argument-less commands)
    pub request: AttributeValue,
    /// Attributes of the addressed cluster at the time of the call
    pub attributes: AttributeValue,
    pub endpoint: EndpointContext,
    /// Opaque device reference registered with the endpoint
    #[serde(skip)]
    pub device: Option<Arc<dyn Any + Send + Sync>>,
}

impl HandlerData {
    /// Downcast the bound device reference.
    pub fn device<T: Any>(&self) -> Option<&T> {
        self.device.as_deref().and_then(|d| d.downcast_ref::<T>())
    }
}

impl fmt::Debug for HandlerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerData")
            .field("request", &self.request)
            .field("attributes", &self.attributes)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Plugin side of the bridge.
///
/// # Example
/// ```ignore
/// struct Heater;
///
/// #[async_trait]
/// impl DeviceCommandHandler for Heater {
///     async fn execute_handler(&self, operation: &str, data: HandlerData) -> Result<()> {
///         log::info!("{} on {}", operation, data.endpoint.unique_storage_key);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait DeviceCommandHandler: Send + Sync + 'static {
    /// Execute `operation` (lower camel case command name, e.g. `changeToMode`).
    async fn execute_handler(&self, operation: &str, data: HandlerData) -> Result<()>;
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

type HandlerFn = Arc<dyn Fn(HandlerData) -> HandlerFuture + Send + Sync>;

/// Named-function dispatch table implementing [`DeviceCommandHandler`].
///
/// Operations without a registered function fail with
/// [`BridgeError::HandlerNotFound`].
#[derive(Default)]
pub struct CommandHandler {
    handlers: RwLock<HashMap<String, HandlerFn>>,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `operation`, replacing any previous one.
    pub fn add_handler<F, Fut>(&self, operation: impl Into<String>, handler: F)
    where
        F: Fn(HandlerData) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let handler: HandlerFn = Arc::new(move |data| Box::pin(handler(data)));
        self.handlers.write().insert(operation.into(), handler);
    }

    pub fn has_handler(&self, operation: &str) -> bool {
        self.handlers.read().contains_key(operation)
    }

    pub fn remove_handler(&self, operation: &str) -> bool {
        self.handlers.write().remove(operation).is_some()
    }
}

#[async_trait]
impl DeviceCommandHandler for CommandHandler {
    async fn execute_handler(&self, operation: &str, data: HandlerData) -> Result<()> {
        let handler = self
            .handlers
            .read()
            .get(operation)
            .cloned()
            .ok_or_else(|| BridgeError::HandlerNotFound(operation.to_string()))?;
        handler(data).await
    }
}
