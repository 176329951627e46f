//! Form field value objects and the field registry

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shape of the value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    StringSet,
    Flag,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::StringSet => write!(f, "string set"),
            FieldKind::Flag => write!(f, "flag"),
        }
    }
}

/// Type-safe field values
///
/// Serialized untagged, so a payload carries plain strings, arrays and booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Set(Vec<String>),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Set(_) => FieldKind::StringSet,
            FieldValue::Flag(_) => FieldKind::Flag,
        }
    }

    /// Default value for a field kind
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::StringSet => FieldValue::Set(Vec::new()),
            FieldKind::Flag => FieldValue::Flag(false),
        }
    }

    /// Blank text, an empty set and an unset flag count as empty
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Set(items) => items.is_empty(),
            FieldValue::Flag(b) => !b,
        }
    }

    /// Get the text value (returns empty string for other kinds)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the set items (returns an empty slice for other kinds)
    pub fn as_set(&self) -> &[String] {
        match self {
            FieldValue::Set(items) => items,
            _ => &[],
        }
    }

    /// Get the flag value (returns false for other kinds)
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Drop duplicate set entries, keeping the first occurrence
    pub(crate) fn normalized(self) -> Self {
        match self {
            FieldValue::Set(items) => {
                let mut seen = Vec::with_capacity(items.len());
                for item in items {
                    if !seen.contains(&item) {
                        seen.push(item);
                    }
                }
                FieldValue::Set(seen)
            }
            other => other,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Set(items) => items.join(", "),
            FieldValue::Flag(true) => "[x]".to_string(),
            FieldValue::Flag(false) => "[ ]".to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Set(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Static description of a single form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldValue,
}

impl FieldDef {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Create a new multi-select field
    pub fn string_set(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::StringSet)
    }

    /// Create a new boolean flag field
    pub fn flag(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Flag)
    }

    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            default: FieldValue::empty(kind),
        }
    }

    /// Override the default value; the kind must match
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        debug_assert_eq!(value.kind(), self.kind, "default for {}", self.name);
        self.default = value;
        self
    }
}

/// Ordered collection of every field in a form
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDef>,
}

impl FieldRegistry {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Snapshot holding every field at its default
    pub fn defaults(&self) -> FormSnapshot {
        FormSnapshot(
            self.fields
                .iter()
                .map(|f| (f.name.to_string(), f.default.clone()))
                .collect(),
        )
    }
}

/// Current value of every field, keyed by field name
///
/// Serializes as the flat submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot(BTreeMap<String, FieldValue>);

impl FormSnapshot {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of a field, empty when absent or not text
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, name: &str, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(name.to_string(), value)
    }

    pub(crate) fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.0
    }
}

impl From<BTreeMap<String, FieldValue>> for FormSnapshot {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        Self(map)
    }
}

/// Partial set of field values for bulk loading
///
/// Each entry is checked against the registry when applied; entries that do
/// not match are reported back instead of being applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPatch {
    entries: BTreeMap<String, FieldValue>,
}

impl FormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.entries.insert(name.to_string(), value.into());
    }

    /// Add an entry only when a value is present
    pub fn set_opt<V: Into<FieldValue>>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, FieldValue)> {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FieldRegistry {
        FieldRegistry::new(vec![
            FieldDef::text("title", "Title"),
            FieldDef::string_set("labels", "Labels"),
            FieldDef::flag("draft", "Draft").with_default(true),
        ])
    }

    mod field_value {
        use super::*;

        #[test]
        fn test_empty_matches_kind() {
            assert_eq!(FieldValue::empty(FieldKind::Text), FieldValue::Text(String::new()));
            assert_eq!(FieldValue::empty(FieldKind::StringSet), FieldValue::Set(vec![]));
            assert_eq!(FieldValue::empty(FieldKind::Flag), FieldValue::Flag(false));
        }

        #[test]
        fn test_blank_text_is_empty() {
            assert!(FieldValue::from("   ").is_empty());
            assert!(!FieldValue::from(" x ").is_empty());
        }

        #[test]
        fn test_normalized_dedupes_in_order() {
            let value = FieldValue::Set(vec!["b".into(), "a".into(), "b".into()]).normalized();
            assert_eq!(value.as_set(), &["b".to_string(), "a".to_string()]);
        }

        #[test]
        fn test_untagged_serialization() {
            let json = serde_json::to_string(&vec![
                FieldValue::from("x"),
                FieldValue::Set(vec!["a".into()]),
                FieldValue::Flag(true),
            ])
            .unwrap();
            assert_eq!(json, r#"["x",["a"],true]"#);

            let parsed: Vec<FieldValue> = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed[1].kind(), FieldKind::StringSet);
            assert_eq!(parsed[2].kind(), FieldKind::Flag);
        }

        #[test]
        fn test_display_value() {
            assert_eq!(FieldValue::Flag(true).display_value(), "[x]");
            assert_eq!(
                FieldValue::Set(vec!["a".into(), "b".into()]).display_value(),
                "a, b"
            );
        }
    }

    mod registry {
        use super::*;

        #[test]
        fn test_defaults_cover_every_field() {
            let defaults = registry().defaults();
            assert_eq!(defaults.len(), 3);
            assert_eq!(defaults.get("draft"), Some(&FieldValue::Flag(true)));
            assert_eq!(defaults.text("title"), "");
        }

        #[test]
        fn test_lookup_by_name() {
            let registry = registry();
            assert_eq!(registry.get("labels").unwrap().kind, FieldKind::StringSet);
            assert!(!registry.contains("missing"));
            assert_eq!(registry.names().collect::<Vec<_>>(), ["title", "labels", "draft"]);
        }

        #[test]
        fn test_snapshot_serializes_flat() {
            let json = serde_json::to_value(registry().defaults()).unwrap();
            assert_eq!(json, serde_json::json!({"title": "", "labels": [], "draft": true}));
        }
    }

    mod patch {
        use super::*;

        #[test]
        fn test_set_opt_skips_none() {
            let mut patch = FormPatch::new();
            patch.set_opt::<String>("title", None);
            assert!(patch.is_empty());
            patch.set_opt("title", Some("x"));
            assert_eq!(patch.into_entries().count(), 1);
        }
    }
}
