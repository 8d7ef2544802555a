//! Attribute bridge: read, write and watch cluster attributes by name.
//!
//! Clusters are addressed with anything convertible into a [`ClusterRef`]
//! (behavior type, numeric id or case-insensitive name). Attribute names are
//! normalized to lower camel case, so `"CurrentMode"` and `"currentMode"` are
//! the same attribute. The global attributes every cluster carries are
//! computed from the behavior and are read-only.
//!
//! The public entry points log failures at error level and report them as
//! `None`/`false`; the `try_*` variants return the underlying error.

use crate::error::{BridgeError, Result};
use crate::matter::clusters::measurement::CONCENTRATION_ATTRIBUTE_NAMES;
use crate::matter::clusters::{AttributeValue, ClusterKind, ClusterRef};
use crate::matter::commands;
use crate::matter::endpoints::{AttributeChange, ClusterBehavior, Endpoint};
use rs_matter::dm::{AttrId, ClusterId};
use serde_json::json;
use std::sync::Arc;
use strum::FromRepr;

/// Attributes present on every cluster.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u32)]
pub enum GlobalAttribute {
    GeneratedCommandList = 0xFFF8,
    AcceptedCommandList = 0xFFF9,
    EventList = 0xFFFA,
    AttributeList = 0xFFFB,
    FeatureMap = 0xFFFC,
    ClusterRevision = 0xFFFD,
}

impl GlobalAttribute {
    pub const ALL: [Self; 6] = [
        Self::GeneratedCommandList,
        Self::AcceptedCommandList,
        Self::EventList,
        Self::AttributeList,
        Self::FeatureMap,
        Self::ClusterRevision,
    ];

    pub const fn id(self) -> AttrId {
        self as AttrId
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GeneratedCommandList => "generatedCommandList",
            Self::AcceptedCommandList => "acceptedCommandList",
            Self::EventList => "eventList",
            Self::AttributeList => "attributeList",
            Self::FeatureMap => "featureMap",
            Self::ClusterRevision => "clusterRevision",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|global| global.name() == name)
    }

    fn value(self, behavior: &ClusterBehavior) -> AttributeValue {
        let behavior_type = behavior.behavior_type();
        match self {
            Self::GeneratedCommandList => json!(commands::generated_commands(behavior_type)),
            Self::AcceptedCommandList => json!(commands::accepted_commands(behavior_type)),
            Self::EventList => json!([]),
            Self::AttributeList => {
                let mut ids = behavior.state().attribute_ids(behavior_type.feature_map);
                ids.extend(Self::ALL.map(Self::id));
                ids.sort_unstable();
                json!(ids)
            }
            Self::FeatureMap => json!(behavior_type.feature_map),
            Self::ClusterRevision => json!(behavior_type.kind.revision()),
        }
    }
}

/// Lower-case the first letter: `"OnOff"` becomes `"onOff"`.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Where a named attribute lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Global(GlobalAttribute),
    Cluster(AttrId),
}

fn cluster_id(endpoint: &Endpoint, cluster: ClusterRef<'_>) -> Result<ClusterId> {
    let id = cluster
        .cluster_id()
        .ok_or_else(|| BridgeError::ClusterNotFound(cluster.to_string(), endpoint.to_string()))?;
    if !endpoint.has_cluster(id) {
        return Err(BridgeError::ClusterNotFound(cluster.to_string(), endpoint.to_string()));
    }
    Ok(id)
}

fn resolve(
    endpoint: &Endpoint,
    cluster: ClusterRef<'_>,
    name: &str,
) -> Result<(ClusterId, Target)> {
    let id = cluster_id(endpoint, cluster)?;
    let name = normalize_name(name);
    if let Some(global) = GlobalAttribute::from_name(&name) {
        return Ok((id, Target::Global(global)));
    }
    let attribute = endpoint
        .with_behavior(id, |b| {
            b.state().attribute_id(&name, b.behavior_type().feature_map)
        })?
        .ok_or_else(|| BridgeError::AttributeNotFound {
            cluster: cluster.to_string(),
            attribute: name.clone(),
        })?;
    Ok((id, Target::Cluster(attribute)))
}

/// Id of attribute `name` on `cluster`.
///
/// Concentration-measurement clusters resolve their reserved names even when
/// the feature map leaves the attribute out of the schema.
pub fn attribute_id<'a>(
    endpoint: &Endpoint,
    cluster: impl Into<ClusterRef<'a>>,
    name: &str,
) -> Option<AttrId> {
    let cluster = cluster.into();
    match resolve(endpoint, cluster, name) {
        Ok((_, Target::Global(global))) => Some(global.id()),
        Ok((_, Target::Cluster(id))) => Some(id),
        Err(err) => {
            let concentration = cluster
                .cluster_id()
                .and_then(ClusterKind::from_id)
                .filter(|kind| kind.is_concentration());
            let normalized = normalize_name(name);
            match concentration.and_then(|_| {
                CONCENTRATION_ATTRIBUTE_NAMES
                    .iter()
                    .position(|reserved| *reserved == normalized)
            }) {
                Some(position) => Some(position as AttrId),
                None => {
                    log::error!("[Matter] {}: {}", endpoint, err);
                    None
                }
            }
        }
    }
}

pub fn try_get_attribute(
    endpoint: &Endpoint,
    cluster: ClusterRef<'_>,
    name: &str,
) -> Result<AttributeValue> {
    endpoint.ensure_active()?;
    let value = match resolve(endpoint, cluster, name)? {
        (id, Target::Global(global)) => endpoint.with_behavior(id, |b| global.value(b))?,
        (id, Target::Cluster(attribute)) => endpoint.read_attribute(id, attribute)?,
    };
    log::trace!("[Matter] {}.{}.{} = {}", endpoint, cluster, name, value);
    Ok(value)
}

/// Current value of an attribute, as an owned copy.
pub fn get_attribute<'a>(
    endpoint: &Endpoint,
    cluster: impl Into<ClusterRef<'a>>,
    name: &str,
) -> Option<AttributeValue> {
    try_get_attribute(endpoint, cluster.into(), name)
        .map_err(|err| log::error!("[Matter] Failed to read {} on {}: {}", name, endpoint, err))
        .ok()
}

fn write(
    endpoint: &Endpoint,
    cluster: ClusterRef<'_>,
    name: &str,
    value: AttributeValue,
    only_if_changed: bool,
) -> Result<bool> {
    endpoint.ensure_active()?;
    match resolve(endpoint, cluster, name)? {
        (_, Target::Global(global)) => Err(BridgeError::ReadOnlyAttribute {
            cluster: cluster.to_string(),
            attribute: global.name().to_string(),
        }),
        (id, Target::Cluster(attribute)) => {
            endpoint.write_attribute(id, attribute, value, only_if_changed)
        }
    }
}

pub fn try_set_attribute(
    endpoint: &Endpoint,
    cluster: ClusterRef<'_>,
    name: &str,
    value: AttributeValue,
) -> Result<bool> {
    write(endpoint, cluster, name, value, false)
}

pub fn try_update_attribute(
    endpoint: &Endpoint,
    cluster: ClusterRef<'_>,
    name: &str,
    value: AttributeValue,
) -> Result<bool> {
    write(endpoint, cluster, name, value, true)
}

/// Write an attribute. The change event fires when the value differs.
pub fn set_attribute<'a>(
    endpoint: &Endpoint,
    cluster: impl Into<ClusterRef<'a>>,
    name: &str,
    value: AttributeValue,
) -> bool {
    try_set_attribute(endpoint, cluster.into(), name, value)
        .map_err(|err| log::error!("[Matter] Failed to set {} on {}: {}", name, endpoint, err))
        .unwrap_or(false)
}

/// Write an attribute unless it already holds `value`.
pub fn update_attribute<'a>(
    endpoint: &Endpoint,
    cluster: impl Into<ClusterRef<'a>>,
    name: &str,
    value: AttributeValue,
) -> bool {
    try_update_attribute(endpoint, cluster.into(), name, value)
        .map_err(|err| log::error!("[Matter] Failed to update {} on {}: {}", name, endpoint, err))
        .unwrap_or(false)
}

pub async fn try_subscribe_attribute(
    endpoint: &Endpoint,
    cluster: ClusterRef<'_>,
    name: &str,
    listener: impl Fn(&AttributeChange) + Send + Sync + 'static,
) -> Result<()> {
    endpoint.wait_active().await?;
    match resolve(endpoint, cluster, name)? {
        (_, Target::Global(global)) => Err(BridgeError::NoChangeEvent {
            cluster: cluster.to_string(),
            attribute: global.name().to_string(),
        }),
        (id, Target::Cluster(attribute)) => {
            endpoint.add_listener(id, attribute, Arc::new(listener))?;
            log::debug!(
                "[Matter] {}: listening for {}Changed on {}",
                endpoint,
                normalize_name(name),
                cluster
            );
            Ok(())
        }
    }
}

/// Call `listener` on every change of an attribute.
///
/// Waits, without timeout, for the endpoint to become active.
pub async fn subscribe_attribute<'a>(
    endpoint: &Endpoint,
    cluster: impl Into<ClusterRef<'a>>,
    name: &str,
    listener: impl Fn(&AttributeChange) + Send + Sync + 'static,
) -> bool {
    try_subscribe_attribute(endpoint, cluster.into(), name, listener)
        .await
        .map_err(|err| {
            log::error!("[Matter] Failed to subscribe {} on {}: {}", name, endpoint, err)
        })
        .is_ok()
}
