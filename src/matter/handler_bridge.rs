//! Handler bridge connecting an endpoint to the plugin's command handler.
//!
//! Wraps a `DeviceCommandHandler` together with the plugin's opaque device
//! reference and the endpoint context, so interceptors only need to name the
//! operation and its request.

use super::clusters::AttributeValue;
use super::endpoints::handler::{DeviceCommandHandler, EndpointContext, HandlerData};
use crate::error::{BridgeError, Result};
use std::any::Any;
use std::sync::Arc;

/// Per-endpoint binding of handler, device and identity.
///
/// Lives exactly as long as the endpoint's device binding.
pub struct DeviceCommandAdapter {
    handler: Arc<dyn DeviceCommandHandler>,
    device: Arc<dyn Any + Send + Sync>,
    context: EndpointContext,
}

impl DeviceCommandAdapter {
    pub fn new(
        handler: Arc<dyn DeviceCommandHandler>,
        device: Arc<dyn Any + Send + Sync>,
        context: EndpointContext,
    ) -> Self {
        Self {
            handler,
            device,
            context,
        }
    }

    pub fn context(&self) -> &EndpointContext {
        &self.context
    }

    pub fn device(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.device
    }

    /// Call the handler for `operation`.
    ///
    /// Handler errors surface as [`BridgeError::Handler`]; a missing
    /// registration stays [`BridgeError::HandlerNotFound`].
    pub async fn forward(
        &self,
        operation: &str,
        request: AttributeValue,
        attributes: AttributeValue,
    ) -> Result<()> {
        log::debug!(
            "[Matter] -> {} {} request={}",
            self.context.unique_storage_key,
            operation,
            request
        );
        let data = HandlerData {
            request,
            attributes,
            endpoint: self.context.clone(),
            device: Some(self.device.clone()),
        };
        self.handler
            .execute_handler(operation, data)
            .await
            .map_err(|e| match e {
                e @ (BridgeError::Handler(_) | BridgeError::HandlerNotFound(_)) => e,
                other => BridgeError::Handler(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::endpoints::CommandHandler;

    #[tokio::test]
    async fn test_forward_wraps_handler_errors() {
        let handler = Arc::new(CommandHandler::new());
        handler.add_handler("lockDoor", |_data: HandlerData| async {
            Err(BridgeError::Config("jammed".to_string()))
        });
        let adapter = DeviceCommandAdapter::new(
            handler,
            Arc::new("lock"),
            EndpointContext {
                number: 4,
                unique_storage_key: "lock-1".to_string(),
            },
        );

        let err = adapter
            .forward("lockDoor", serde_json::json!({}), serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Handler(msg) if msg.contains("jammed")));

        let err = adapter
            .forward("unlockDoor", serde_json::json!({}), serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::HandlerNotFound(_)));
    }
}
