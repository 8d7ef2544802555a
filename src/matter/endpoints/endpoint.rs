//! Bridged endpoint: identity, lifecycle, and the cluster behaviors it owns.

use super::behavior::{self, AttributeChange, ChangeListener, ClusterBehavior};
use super::handler::{DeviceCommandHandler, EndpointContext};
use super::notifier::ClusterNotifier;
use crate::error::{BridgeError, Result};
use crate::matter::clusters::{
    AttributeValue, BehaviorType, ClusterKind, ClusterState, ClusterStateVariant,
};
use crate::matter::device_types::DeviceTypeDeclaration;
use crate::matter::handler_bridge::DeviceCommandAdapter;
use parking_lot::{Mutex, RwLock};
use rs_matter::dm::{AttrId, ClusterId, Dataver, EndptId};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Endpoint lifecycle. Attribute and command operations need `Active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Constructing,
    Active,
    Destroyed,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constructing => "constructing",
            Self::Active => "active",
            Self::Destroyed => "destroyed",
        })
    }
}

/// Identity assigned by the runtime once the endpoint is registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointIdentity {
    /// Unique storage key
    pub id: String,
    pub number: EndptId,
}

impl EndpointIdentity {
    pub fn new(id: impl Into<String>, number: EndptId) -> Self {
        Self {
            id: id.into(),
            number,
        }
    }
}

/// An addressable node owning its cluster behaviors.
///
/// State lives behind a mutex that is never held across an await; change
/// listeners and the runtime notifier run after the lock is released.
pub struct Endpoint {
    name: String,
    device_types: Vec<DeviceTypeDeclaration>,
    identity: RwLock<Option<EndpointIdentity>>,
    lifecycle: watch::Sender<Lifecycle>,
    behaviors: Mutex<BTreeMap<ClusterId, ClusterBehavior>>,
    adapter: RwLock<Option<Arc<DeviceCommandAdapter>>>,
    notifier: RwLock<Option<ClusterNotifier>>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, device_types: &[DeviceTypeDeclaration]) -> Self {
        let (lifecycle, _) = watch::channel(Lifecycle::Constructing);
        Self {
            name: name.into(),
            device_types: device_types.to_vec(),
            identity: RwLock::new(None),
            lifecycle,
            behaviors: Mutex::new(BTreeMap::new()),
            adapter: RwLock::new(None),
            notifier: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_types(&self) -> &[DeviceTypeDeclaration] {
        &self.device_types
    }

    pub fn identity(&self) -> Option<EndpointIdentity> {
        self.identity.read().clone()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.borrow()
    }

    // ---- lifecycle ----

    /// Register with the runtime: assign the identity and become `Active`.
    pub fn activate(&self, identity: EndpointIdentity) -> Result<()> {
        let state = self.lifecycle();
        if state != Lifecycle::Constructing {
            return Err(self.lifecycle_error(state));
        }
        log::info!(
            "[Matter] Endpoint {} active as #{} ({})",
            self.name,
            identity.number,
            identity.id
        );
        *self.identity.write() = Some(identity);
        self.lifecycle.send_replace(Lifecycle::Active);
        Ok(())
    }

    /// Tear down; the device binding is dropped with the endpoint state.
    pub fn destroy(&self) {
        log::info!("[Matter] Endpoint {} destroyed", self);
        self.adapter.write().take();
        self.lifecycle.send_replace(Lifecycle::Destroyed);
    }

    pub fn ensure_active(&self) -> Result<()> {
        match self.lifecycle() {
            Lifecycle::Active => Ok(()),
            state => Err(self.lifecycle_error(state)),
        }
    }

    /// Wait until the endpoint is `Active`. There is no timeout.
    pub async fn wait_active(&self) -> Result<()> {
        let mut rx = self.lifecycle.subscribe();
        let state = *rx
            .wait_for(|state| *state != Lifecycle::Constructing)
            .await
            .map_err(|_| self.lifecycle_error(Lifecycle::Destroyed))?;
        match state {
            Lifecycle::Active => Ok(()),
            state => Err(self.lifecycle_error(state)),
        }
    }

    fn lifecycle_error(&self, state: Lifecycle) -> BridgeError {
        BridgeError::Lifecycle {
            endpoint: self.to_string(),
            state: state.to_string(),
        }
    }

    // ---- behaviors ----

    /// Attach a behavior. Returns `false` when the cluster is already present.
    pub fn attach(&self, behavior_type: BehaviorType, state: impl Into<ClusterState>) -> bool {
        let mut behaviors = self.behaviors.lock();
        if behaviors.contains_key(&behavior_type.id()) {
            return false;
        }
        log::debug!(
            "[Matter] Endpoint {}: attach {} (features 0x{:X})",
            self.name,
            behavior_type.kind,
            behavior_type.feature_map
        );
        behaviors.insert(
            behavior_type.id(),
            ClusterBehavior::new(behavior_type, state.into(), Dataver::new(0)),
        );
        true
    }

    pub fn has_cluster(&self, cluster: ClusterId) -> bool {
        self.behaviors.lock().contains_key(&cluster)
    }

    /// Attached cluster ids, ascending.
    pub fn cluster_ids(&self) -> Vec<ClusterId> {
        self.behaviors.lock().keys().copied().collect()
    }

    pub fn behavior_type(&self, cluster: ClusterId) -> Option<BehaviorType> {
        self.behaviors.lock().get(&cluster).map(|b| b.behavior_type)
    }

    /// Run `f` with the behavior of `cluster` while the state lock is held.
    pub fn with_behavior<R>(
        &self,
        cluster: ClusterId,
        f: impl FnOnce(&ClusterBehavior) -> R,
    ) -> Result<R> {
        let behaviors = self.behaviors.lock();
        let behavior = behaviors
            .get(&cluster)
            .ok_or_else(|| self.cluster_not_found(cluster))?;
        Ok(f(behavior))
    }

    fn cluster_not_found(&self, cluster: ClusterId) -> BridgeError {
        let name = match ClusterKind::from_id(cluster) {
            Some(kind) => kind.to_string(),
            None => format!("0x{:04X}", cluster),
        };
        BridgeError::ClusterNotFound(name, self.to_string())
    }

    /// Read typed state of `cluster`.
    pub fn read_state<S: ClusterStateVariant, R>(
        &self,
        cluster: ClusterId,
        f: impl FnOnce(&S) -> R,
    ) -> Result<R> {
        let behaviors = self.behaviors.lock();
        let state = behaviors
            .get(&cluster)
            .and_then(|b| S::from_state(&b.state))
            .ok_or_else(|| self.cluster_not_found(cluster))?;
        Ok(f(state))
    }

    /// Mutate typed state of `cluster`, then log, version and announce every
    /// attribute that changed.
    pub fn mutate_state<S: ClusterStateVariant, R>(
        &self,
        cluster: ClusterId,
        f: impl FnOnce(&mut S) -> R,
    ) -> Result<R> {
        let (result, changes, listeners) = {
            let mut behaviors = self.behaviors.lock();
            let behavior = behaviors
                .get_mut(&cluster)
                .ok_or_else(|| self.cluster_not_found(cluster))?;
            let before = behavior.snapshot();
            let state = S::from_state_mut(&mut behavior.state)
                .ok_or_else(|| self.cluster_not_found(cluster))?;
            let result = f(state);
            let changes = behavior::diff(
                &self.name,
                behavior.behavior_type.kind,
                before,
                behavior.snapshot(),
            );
            let listeners = self.collect_changed(behavior, &changes);
            (result, changes, listeners)
        };
        self.announce(cluster, &changes, listeners);
        Ok(result)
    }

    /// Read one attribute by id.
    pub fn read_attribute(&self, cluster: ClusterId, attribute: AttrId) -> Result<AttributeValue> {
        self.with_behavior(cluster, |b| {
            b.state
                .read(attribute, b.behavior_type.feature_map)
                .ok_or(BridgeError::UnknownAttributeId(attribute))
        })?
    }

    /// Write one attribute by id.
    ///
    /// With `only_if_changed` a deep-equal value is a no-op returning
    /// `Ok(false)`. Otherwise the value is always written; listeners fire only
    /// when the stored value actually changed.
    pub fn write_attribute(
        &self,
        cluster: ClusterId,
        attribute: AttrId,
        value: AttributeValue,
        only_if_changed: bool,
    ) -> Result<bool> {
        let (change, listeners) = {
            let mut behaviors = self.behaviors.lock();
            let behavior = behaviors
                .get_mut(&cluster)
                .ok_or_else(|| self.cluster_not_found(cluster))?;
            let feature_map = behavior.behavior_type.feature_map;
            let old = behavior
                .state
                .read(attribute, feature_map)
                .ok_or(BridgeError::UnknownAttributeId(attribute))?;
            if only_if_changed && old == value {
                return Ok(false);
            }
            behavior.state.write(attribute, value, feature_map)?;
            let new = behavior
                .state
                .read(attribute, feature_map)
                .ok_or(BridgeError::UnknownAttributeId(attribute))?;
            let name = behavior.state.attribute_name(attribute).unwrap_or("?");
            log::info!(
                "[Matter] {}.{}.{}: {} -> {}",
                self,
                behavior.behavior_type.kind,
                name,
                old,
                new
            );
            let change = AttributeChange {
                endpoint: self.name.clone(),
                cluster: behavior.behavior_type.kind,
                attribute_id: attribute,
                attribute: name,
                old,
                new,
            };
            if change.old == change.new {
                (None, Vec::new())
            } else {
                let changes = [change];
                let listeners = self.collect_changed(behavior, &changes);
                let [change] = changes;
                (Some(change), listeners)
            }
        };
        if let Some(change) = change {
            self.announce(cluster, std::slice::from_ref(&change), listeners);
        }
        Ok(true)
    }

    /// Register a listener for changes of one attribute.
    pub fn add_listener(
        &self,
        cluster: ClusterId,
        attribute: AttrId,
        listener: ChangeListener,
    ) -> Result<()> {
        let mut behaviors = self.behaviors.lock();
        let behavior = behaviors
            .get_mut(&cluster)
            .ok_or_else(|| self.cluster_not_found(cluster))?;
        behavior.listeners.entry(attribute).or_default().push(listener);
        Ok(())
    }

    /// Bump the data version and collect listeners of every changed attribute.
    fn collect_changed(
        &self,
        behavior: &ClusterBehavior,
        changes: &[AttributeChange],
    ) -> Vec<(usize, ChangeListener)> {
        if changes.is_empty() {
            return Vec::new();
        }
        behavior.dataver.changed();
        changes
            .iter()
            .enumerate()
            .flat_map(|(i, change)| {
                behavior
                    .listeners_for(change.attribute_id)
                    .into_iter()
                    .map(move |listener| (i, listener))
            })
            .collect()
    }

    /// Runs with the state lock released.
    fn announce(
        &self,
        cluster: ClusterId,
        changes: &[AttributeChange],
        listeners: Vec<(usize, ChangeListener)>,
    ) {
        if changes.is_empty() {
            return;
        }
        for change in changes {
            log::debug!(
                "[Matter] {}.{}.{} changed: {} -> {}",
                self,
                change.cluster,
                change.attribute,
                change.old,
                change.new
            );
        }
        if let Some(notifier) = self.notifier.read().as_ref() {
            notifier.notify(cluster);
        }
        for (i, listener) in listeners {
            listener(&changes[i]);
        }
    }

    // ---- runtime and device binding ----

    pub fn set_notifier(&self, notifier: ClusterNotifier) {
        *self.notifier.write() = Some(notifier);
    }

    /// Bind the plugin's handler and device. Needs the runtime identity.
    pub fn bind_device(
        &self,
        handler: Arc<dyn DeviceCommandHandler>,
        device: Arc<dyn Any + Send + Sync>,
    ) -> Result<()> {
        let identity = self
            .identity()
            .ok_or_else(|| BridgeError::NotBound(self.name.clone()))?;
        let context = EndpointContext {
            number: identity.number,
            unique_storage_key: identity.id,
        };
        *self.adapter.write() = Some(Arc::new(DeviceCommandAdapter::new(handler, device, context)));
        Ok(())
    }

    pub fn adapter(&self) -> Result<Arc<DeviceCommandAdapter>> {
        self.adapter
            .read()
            .clone()
            .ok_or_else(|| BridgeError::NotBound(self.to_string()))
    }

    /// Forward `operation` on `cluster` to the bound device handler.
    pub async fn forward(
        &self,
        cluster: ClusterId,
        operation: &str,
        request: AttributeValue,
    ) -> Result<()> {
        let adapter = self.adapter()?;
        let attributes = self.with_behavior(cluster, ClusterBehavior::attributes_json)?;
        adapter.forward(operation, request, attributes).await
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity.read().as_ref() {
            Some(identity) => write!(f, "{}#{}", self.name, identity.number),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::{ClusterAttribute, OnOffState, on_off};
    use crate::matter::device_types;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn light() -> Endpoint {
        let endpoint = Endpoint::new("lamp", &[device_types::ON_OFF_LIGHT]);
        endpoint.attach(BehaviorType::ON_OFF, OnOffState::default());
        endpoint
    }

    #[test]
    fn test_lifecycle() {
        let endpoint = light();
        assert_eq!(endpoint.lifecycle(), Lifecycle::Constructing);
        assert!(endpoint.ensure_active().is_err());

        endpoint.activate(EndpointIdentity::new("lamp-1", 3)).unwrap();
        assert!(endpoint.ensure_active().is_ok());
        assert_eq!(endpoint.to_string(), "lamp#3");
        assert!(endpoint.activate(EndpointIdentity::new("lamp-1", 3)).is_err());

        endpoint.destroy();
        let err = endpoint.ensure_active().unwrap_err();
        assert!(matches!(err, BridgeError::Lifecycle { state, .. } if state == "destroyed"));
    }

    #[test]
    fn test_attach_once() {
        let endpoint = light();
        assert!(!endpoint.attach(BehaviorType::ON_OFF_LIGHTING, OnOffState::new(true)));
        assert_eq!(endpoint.cluster_ids(), vec![0x0006]);
        assert_eq!(endpoint.behavior_type(0x0006), Some(BehaviorType::ON_OFF));
    }

    #[test]
    fn test_mutate_notifies_listeners_once_per_change() {
        let endpoint = light();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        endpoint
            .add_listener(
                0x0006,
                on_off::OnOffAttribute::OnOff.id(),
                Arc::new(move |change: &AttributeChange| {
                    assert_eq!(change.new, serde_json::json!(true));
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        let before = endpoint.with_behavior(0x0006, |b| b.dataver()).unwrap();
        endpoint
            .mutate_state::<OnOffState, _>(0x0006, |s| s.on_off = true)
            .unwrap();
        // Same value again: no change, no listener call
        endpoint
            .mutate_state::<OnOffState, _>(0x0006, |s| s.on_off = true)
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let after = endpoint.with_behavior(0x0006, |b| b.dataver()).unwrap();
        assert_eq!(after, before.wrapping_add(1));
    }

    #[test]
    fn test_write_attribute_update_semantics() {
        let endpoint = light();
        let id = on_off::OnOffAttribute::OnOff.id();
        assert!(!endpoint
            .write_attribute(0x0006, id, serde_json::json!(false), true)
            .unwrap());
        assert!(endpoint
            .write_attribute(0x0006, id, serde_json::json!(false), false)
            .unwrap());
        assert!(endpoint
            .write_attribute(0x0006, id, serde_json::json!(true), true)
            .unwrap());
        assert_eq!(
            endpoint.read_attribute(0x0006, id).unwrap(),
            serde_json::json!(true)
        );
    }

    #[test]
    fn test_wrong_downcast_is_not_found() {
        let endpoint = light();
        let result = endpoint.read_state::<crate::matter::clusters::FanControlState, _>(
            0x0006,
            |s| s.percent_current,
        );
        assert!(matches!(result, Err(BridgeError::ClusterNotFound(..))));
    }

    #[tokio::test]
    async fn test_wait_active() {
        let endpoint = Arc::new(light());
        let waiter = {
            let endpoint = endpoint.clone();
            tokio::spawn(async move { endpoint.wait_active().await })
        };
        tokio::task::yield_now().await;
        endpoint.activate(EndpointIdentity::new("lamp-1", 3)).unwrap();
        assert!(waiter.await.unwrap().is_ok());

        let gone = light();
        gone.destroy();
        assert!(gone.wait_active().await.is_err());
    }

    #[test]
    fn test_bind_needs_identity() {
        let endpoint = light();
        let handler = Arc::new(crate::matter::endpoints::CommandHandler::new());
        assert!(matches!(
            endpoint.bind_device(handler.clone(), Arc::new(())),
            Err(BridgeError::NotBound(_))
        ));
        endpoint.activate(EndpointIdentity::new("lamp-1", 3)).unwrap();
        endpoint.bind_device(handler, Arc::new(())).unwrap();
        assert_eq!(endpoint.adapter().unwrap().context().number, 3);
    }
}
