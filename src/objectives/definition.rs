//! Objective definitions - static authored data.
//!
//! `ObjectiveDefinition` holds the immutable properties of an optional
//! goal: its condition, description template, and reward. Per-session
//! data (completed/failed, progress) lives in `ObjectiveState`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conditions::{Condition, Progress};
use crate::core::Difficulty;

/// Unique identifier for an objective definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectiveId(pub u32);

impl ObjectiveId {
    /// Create a new objective ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Objective({})", self.0)
    }
}

/// Static objective definition.
///
/// ## Example
///
/// ```
/// use objective_engine::conditions::{Condition, ConditionKind};
/// use objective_engine::core::Difficulty;
/// use objective_engine::objectives::{ObjectiveDefinition, ObjectiveId};
///
/// let spotless = ObjectiveDefinition::new(
///     ObjectiveId::new(1),
///     "Win with no more than {{maxLosses}} {{plural|maxLosses|casualty|casualties}}",
///     Condition::new(ConditionKind::MaxCasualties).with_param("maxLosses", 2),
///     50,
/// )
/// .with_reward_override(Difficulty::Hard, 100);
///
/// assert_eq!(spotless.reward_for(Some(Difficulty::Hard)), 100);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDefinition {
    /// Unique identifier.
    pub id: ObjectiveId,

    /// Description template; may contain `{{...}}` substitution tokens.
    pub description: String,

    /// Plain description used when the template fails to resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_description: Option<String>,

    /// The condition deciding this objective.
    pub condition: Condition,

    /// Base reward in gold.
    pub reward: i64,

    /// Per-difficulty reward overrides.
    #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
    pub reward_overrides: FxHashMap<Difficulty, i64>,

    /// Progress to seed the per-session state with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_progress: Option<Progress>,
}

impl ObjectiveDefinition {
    /// Create an objective definition.
    #[must_use]
    pub fn new(
        id: ObjectiveId,
        description: impl Into<String>,
        condition: Condition,
        reward: i64,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            fallback_description: None,
            condition,
            reward,
            reward_overrides: FxHashMap::default(),
            initial_progress: None,
        }
    }

    /// Set the plain fallback description (builder pattern).
    #[must_use]
    pub fn with_fallback_description(mut self, description: impl Into<String>) -> Self {
        self.fallback_description = Some(description.into());
        self
    }

    /// Add a per-difficulty reward override (builder pattern).
    #[must_use]
    pub fn with_reward_override(mut self, difficulty: Difficulty, reward: i64) -> Self {
        self.reward_overrides.insert(difficulty, reward);
        self
    }

    /// Seed the session state with initial progress (builder pattern).
    #[must_use]
    pub fn with_initial_progress(mut self, current: u32, target: u32) -> Self {
        self.initial_progress = Some(Progress::new(current, target));
        self
    }
}

/// Error registering an objective definition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObjectiveSetError {
    /// Two definitions share an id.
    #[error("{0} already registered")]
    DuplicateId(ObjectiveId),
}

/// Registry of objective definitions for one level, in authored order.
///
/// Authored content is a list of definitions; build the set with
/// `from_definitions` after deserializing the list.
#[derive(Clone, Debug, Default)]
pub struct ObjectiveSet {
    definitions: Vec<ObjectiveDefinition>,
    by_id: FxHashMap<ObjectiveId, usize>,
}

impl ObjectiveSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from authored definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ObjectiveDefinition>,
    ) -> Result<Self, ObjectiveSetError> {
        let mut set = Self::new();
        for definition in definitions {
            set.register(definition)?;
        }
        Ok(set)
    }

    /// Register a definition, rejecting duplicate ids.
    pub fn register(&mut self, definition: ObjectiveDefinition) -> Result<(), ObjectiveSetError> {
        if self.by_id.contains_key(&definition.id) {
            return Err(ObjectiveSetError::DuplicateId(definition.id));
        }
        self.by_id.insert(definition.id, self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    /// Look up a definition by id.
    #[must_use]
    pub fn get(&self, id: ObjectiveId) -> Option<&ObjectiveDefinition> {
        self.by_id.get(&id).map(|&index| &self.definitions[index])
    }

    /// Iterate definitions in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectiveDefinition> {
        self.definitions.iter()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Is the set empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::ConditionKind;

    fn definition(id: u32) -> ObjectiveDefinition {
        ObjectiveDefinition::new(
            ObjectiveId::new(id),
            "Lose no pieces",
            Condition::new(ConditionKind::MaxCasualties).with_param("maxLosses", 0),
            25,
        )
    }

    #[test]
    fn test_objective_id_display() {
        assert_eq!(ObjectiveId::new(3).to_string(), "Objective(3)");
    }

    #[test]
    fn test_register_preserves_order() {
        let set =
            ObjectiveSet::from_definitions([definition(2), definition(0), definition(1)]).unwrap();

        let order: Vec<u32> = set.iter().map(|d| d.id.raw()).collect();
        assert_eq!(order, vec![2, 0, 1]);
        assert!(set.get(ObjectiveId::new(0)).is_some());
        assert!(set.get(ObjectiveId::new(9)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut set = ObjectiveSet::new();
        set.register(definition(1)).unwrap();

        let err = set.register(definition(1)).unwrap_err();
        assert_eq!(err, ObjectiveSetError::DuplicateId(ObjectiveId::new(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_definition_from_json() {
        let json = r#"{
            "id": 4,
            "description": "Kill {{count}} knight{{s|count}}",
            "condition": {
                "kind": "kill_count",
                "params": {"count": 2, "pieceType": "knight"},
                "overrides": {"hard": {"count": 3}}
            },
            "reward": 40,
            "reward_overrides": {"hard": 80}
        }"#;

        let definition: ObjectiveDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.id, ObjectiveId::new(4));
        assert_eq!(definition.condition.kind, ConditionKind::KillCount);
        assert_eq!(
            definition.reward_overrides.get(&Difficulty::Hard),
            Some(&80)
        );
    }
}
