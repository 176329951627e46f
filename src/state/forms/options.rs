//! Externally supplied option sets for cascading selections

use serde::{Deserialize, Serialize};

/// Fields fed by the options lookup: one parent selection narrows two levels beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsBinding {
    pub parent: &'static str,
    pub mid: &'static str,
    pub leaf: &'static str,
}

/// Valid mid and leaf values for one parent entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentOptions {
    pub parent: String,
    #[serde(default)]
    pub mid: Vec<String>,
    #[serde(default)]
    pub leaf: Vec<String>,
}

/// Lookup table from parent entity to its option sets
///
/// Owned by the data-loading collaborator; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsLookup {
    entries: Vec<ParentOptions>,
}

impl OptionsLookup {
    pub fn new(entries: Vec<ParentOptions>) -> Self {
        Self { entries }
    }

    /// Parent identifiers in their supplied order
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.parent.as_str())
    }

    pub fn get(&self, parent: &str) -> Option<&ParentOptions> {
        self.entries.iter().find(|e| e.parent == parent)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Options available once `parent` is selected
    pub fn available_for(&self, parent: &str) -> AvailableOptions {
        self.get(parent)
            .map(|e| AvailableOptions {
                mid: e.mid.clone(),
                leaf: e.leaf.clone(),
            })
            .unwrap_or_default()
    }
}

/// Projection of the lookup for the current parent value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableOptions {
    pub mid: Vec<String>,
    pub leaf: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> OptionsLookup {
        serde_json::from_str(
            r##"[
                {"parent": "acme", "mid": ["web", "api"], "leaf": ["#1", "#2"]},
                {"parent": "globex", "mid": ["infra"]}
            ]"##,
        )
        .unwrap()
    }

    #[test]
    fn test_parents_keep_order() {
        assert_eq!(lookup().parents().collect::<Vec<_>>(), ["acme", "globex"]);
    }

    #[test]
    fn test_available_for_known_parent() {
        let options = lookup().available_for("acme");
        assert_eq!(options.mid, ["web", "api"]);
        assert_eq!(options.leaf, ["#1", "#2"]);
    }

    #[test]
    fn test_missing_leaf_defaults_to_empty() {
        assert!(lookup().available_for("globex").leaf.is_empty());
    }

    #[test]
    fn test_unknown_parent_is_empty() {
        assert_eq!(lookup().available_for("initech"), AvailableOptions::default());
    }
}
