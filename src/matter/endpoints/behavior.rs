//! A cluster behavior attached to an endpoint.

use crate::matter::clusters::{AttributeValue, BehaviorType, ClusterKind, ClusterState};
use crate::matter::commands::{self, CommandSpec};
use rs_matter::dm::{AttrId, Dataver};
use std::collections::HashMap;
use std::sync::Arc;

/// One attribute change, delivered to `<attribute>Changed` listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeChange {
    pub endpoint: String,
    pub cluster: ClusterKind,
    pub attribute_id: AttrId,
    pub attribute: &'static str,
    pub old: AttributeValue,
    pub new: AttributeValue,
}

impl AttributeChange {
    /// Name of the change event, e.g. `currentModeChanged`.
    pub fn event_name(&self) -> String {
        format!("{}Changed", self.attribute)
    }
}

pub type ChangeListener = Arc<dyn Fn(&AttributeChange) + Send + Sync>;

/// Typed state, data version, bound commands and change listeners of one
/// cluster on one endpoint.
pub struct ClusterBehavior {
    pub(crate) behavior_type: BehaviorType,
    pub(crate) state: ClusterState,
    pub(crate) dataver: Dataver,
    pub(crate) commands: &'static [CommandSpec],
    pub(crate) listeners: HashMap<AttrId, Vec<ChangeListener>>,
}

impl ClusterBehavior {
    /// Create the behavior and bind the command interceptor table of its kind.
    pub fn new(behavior_type: BehaviorType, state: ClusterState, dataver: Dataver) -> Self {
        Self {
            behavior_type,
            state,
            dataver,
            commands: commands::specs(behavior_type.kind),
            listeners: HashMap::new(),
        }
    }

    pub fn behavior_type(&self) -> BehaviorType {
        self.behavior_type
    }

    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    pub fn dataver(&self) -> u32 {
        self.dataver.get()
    }

    /// Command specs available under this behavior's feature map.
    pub fn accepted(&self) -> impl Iterator<Item = &'static CommandSpec> + '_ {
        self.commands
            .iter()
            .filter(|spec| spec.enabled(self.behavior_type.feature_map))
    }

    pub(crate) fn snapshot(&self) -> Vec<(AttrId, &'static str, AttributeValue)> {
        self.state.snapshot(self.behavior_type.feature_map)
    }

    /// Attributes as a JSON object keyed by wire name.
    pub fn attributes_json(&self) -> AttributeValue {
        AttributeValue::Object(
            self.snapshot()
                .into_iter()
                .map(|(_, name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    pub(crate) fn listeners_for(&self, attribute: AttrId) -> Vec<ChangeListener> {
        self.listeners.get(&attribute).cloned().unwrap_or_default()
    }
}

/// Compare two snapshots of the same schema and collect the differences.
pub(crate) fn diff(
    endpoint: &str,
    cluster: ClusterKind,
    before: Vec<(AttrId, &'static str, AttributeValue)>,
    after: Vec<(AttrId, &'static str, AttributeValue)>,
) -> Vec<AttributeChange> {
    before
        .into_iter()
        .zip(after)
        .filter(|((_, _, old), (_, _, new))| old != new)
        .map(|((id, name, old), (_, _, new))| AttributeChange {
            endpoint: endpoint.to_string(),
            cluster,
            attribute_id: id,
            attribute: name,
            old,
            new,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::WaterHeaterManagementState;

    #[test]
    fn test_diff_reports_changed_attributes_only() {
        let behavior = BehaviorType::WATER_HEATER_MANAGEMENT;
        let before = ClusterState::from(WaterHeaterManagementState::default());
        let mut after = before.clone();
        if let ClusterState::WaterHeaterManagement(state) = &mut after {
            state.boost_state = 1;
        }

        let changes = diff(
            "heater",
            behavior.kind,
            before.snapshot(behavior.feature_map),
            after.snapshot(behavior.feature_map),
        );
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].attribute, "boostState");
        assert_eq!(changes[0].event_name(), "boostStateChanged");
        assert_eq!(changes[0].old, serde_json::json!(0));
        assert_eq!(changes[0].new, serde_json::json!(1));
    }

    #[test]
    fn test_accepted_follows_feature_map() {
        let fan = ClusterBehavior::new(
            BehaviorType::FAN_CONTROL_STEP,
            crate::matter::clusters::FanControlState::default().into(),
            Dataver::new(0),
        );
        assert!(fan.accepted().any(|spec| spec.name == "step"));

        let plain = ClusterBehavior::new(
            BehaviorType::plain(ClusterKind::FanControl),
            crate::matter::clusters::FanControlState::default().into(),
            Dataver::new(0),
        );
        assert_eq!(plain.accepted().count(), 0);
    }
}
