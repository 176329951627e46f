//! Declarative per-field validation rules

use super::field::{FieldKind, FieldRegistry, FormSnapshot};
use super::schema::FormMode;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Date format accepted by date rules
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// When a required rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    /// Required while creating; an existing record already satisfied it
    CreateOnly,
}

impl Requirement {
    pub fn applies(self, mode: FormMode) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::CreateOnly => mode == FormMode::Create,
        }
    }
}

/// A single check on a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Blank text, an empty set or an unset flag fails
    Required(Requirement),
    /// Non-empty text must parse as `YYYY-MM-DD`
    Date,
    /// This date must be strictly later than the named date field
    After(&'static str),
    /// Text must not exceed the character count
    MaxLength(usize),
}

/// Field-level validation errors, keyed by field name
pub type FieldErrors = BTreeMap<String, String>;

/// Rules for every field of a form
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(&'static str, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach rules to a field, builder style. Rules run in order; the first failure wins.
    pub fn field(mut self, name: &'static str, rules: Vec<Rule>) -> Self {
        self.rules.push((name, rules));
        self
    }

    pub fn rules_for(&self, name: &str) -> &[Rule] {
        self.rules
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| r.as_slice())
            .unwrap_or_default()
    }

    pub fn is_required(&self, name: &str, mode: FormMode) -> bool {
        self.rules_for(name)
            .iter()
            .any(|rule| matches!(rule, Rule::Required(req) if req.applies(mode)))
    }

    /// Fields whose cross-field rules read `name`
    pub fn dependents_of(&self, name: &str) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|(_, rules)| rules.iter().any(|r| matches!(r, Rule::After(f) if *f == name)))
            .map(|(field, _)| *field)
            .collect()
    }

    /// Run the rules for one field against the snapshot
    pub fn validate_field(
        &self,
        registry: &FieldRegistry,
        name: &str,
        snapshot: &FormSnapshot,
        mode: FormMode,
    ) -> Option<String> {
        let def = registry.get(name)?;
        let value = snapshot.get(name)?;

        for rule in self.rules_for(name) {
            let error = match rule {
                Rule::Required(req) if req.applies(mode) && value.is_empty() => {
                    Some(required_message(def.label, def.kind))
                }
                Rule::Required(_) => None,
                Rule::Date => {
                    let text = value.as_text().trim();
                    if !text.is_empty() && parse_date(text).is_none() {
                        Some(format!("{} must be a date (YYYY-MM-DD)", def.label))
                    } else {
                        None
                    }
                }
                Rule::After(other) => {
                    let later = parse_date(value.as_text());
                    let earlier = parse_date(snapshot.text(other));
                    match (later, earlier) {
                        (Some(later), Some(earlier)) if later <= earlier => {
                            let other_label = registry.get(other).map_or(*other, |d| d.label);
                            Some(format!("{} must be after {}", def.label, other_label))
                        }
                        _ => None,
                    }
                }
                Rule::MaxLength(max) => {
                    if value.as_text().chars().count() > *max {
                        Some(format!("{} must be at most {} characters", def.label, max))
                    } else {
                        None
                    }
                }
            };
            if error.is_some() {
                return error;
            }
        }
        None
    }

    /// Run every field's rules, ignoring visibility
    pub fn validate_form(
        &self,
        registry: &FieldRegistry,
        snapshot: &FormSnapshot,
        mode: FormMode,
    ) -> FieldErrors {
        registry
            .names()
            .filter_map(|name| {
                self.validate_field(registry, name, snapshot, mode)
                    .map(|err| (name.to_string(), err))
            })
            .collect()
    }
}

fn required_message(label: &str, kind: FieldKind) -> String {
    match kind {
        FieldKind::Text => format!("{label} is required"),
        FieldKind::StringSet => format!("{label} must include at least one entry"),
        FieldKind::Flag => format!("{label} must be accepted"),
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::{FieldDef, FieldValue};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn registry() -> FieldRegistry {
        FieldRegistry::new(vec![
            FieldDef::text("title", "Title"),
            FieldDef::string_set("reviewers", "Reviewers"),
            FieldDef::flag("confirmed", "Confirmation"),
            FieldDef::text("start", "Start date"),
            FieldDef::text("end", "End date"),
        ])
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .field("title", vec![Rule::Required(Requirement::Always), Rule::MaxLength(5)])
            .field("reviewers", vec![Rule::Required(Requirement::Always)])
            .field("confirmed", vec![Rule::Required(Requirement::CreateOnly)])
            .field("start", vec![Rule::Required(Requirement::Always), Rule::Date])
            .field(
                "end",
                vec![Rule::Required(Requirement::Always), Rule::Date, Rule::After("start")],
            )
    }

    fn snapshot(entries: &[(&str, FieldValue)]) -> FormSnapshot {
        let mut map: BTreeMap<String, FieldValue> = registry()
            .defaults()
            .into_inner();
        for (name, value) in entries {
            map.insert(name.to_string(), value.clone());
        }
        map.into()
    }

    #[test]
    fn test_required_messages_follow_kind() {
        let errors = rules().validate_form(&registry(), &snapshot(&[]), FormMode::Create);
        assert_eq!(errors.get("title").unwrap(), "Title is required");
        assert_eq!(
            errors.get("reviewers").unwrap(),
            "Reviewers must include at least one entry"
        );
        assert_eq!(errors.get("confirmed").unwrap(), "Confirmation must be accepted");
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_blank_text_is_required_error() {
        let snap = snapshot(&[("title", "   ".into())]);
        assert!(rules()
            .validate_field(&registry(), "title", &snap, FormMode::Create)
            .is_some());
    }

    #[test]
    fn test_create_only_requirement_skipped_in_edit() {
        let rules = rules();
        let snap = snapshot(&[]);
        assert!(rules
            .validate_field(&registry(), "confirmed", &snap, FormMode::Edit)
            .is_none());
        assert!(rules.is_required("confirmed", FormMode::Create));
        assert!(!rules.is_required("confirmed", FormMode::Edit));
    }

    #[test]
    fn test_after_attaches_error_to_later_field() {
        let snap = snapshot(&[
            ("start", "2026-03-10".into()),
            ("end", "2026-03-10".into()),
        ]);
        let errors = rules().validate_form(&registry(), &snap, FormMode::Edit);
        assert!(!errors.contains_key("start"));
        assert_eq!(errors.get("end").unwrap(), "End date must be after Start date");
    }

    #[test]
    fn test_after_passes_when_ordered() {
        let snap = snapshot(&[
            ("start", "2026-03-10".into()),
            ("end", "2026-03-11".into()),
        ]);
        assert!(rules()
            .validate_field(&registry(), "end", &snap, FormMode::Create)
            .is_none());
    }

    #[test]
    fn test_malformed_date() {
        let snap = snapshot(&[("start", "next week".into())]);
        assert_eq!(
            rules().validate_field(&registry(), "start", &snap, FormMode::Create),
            Some("Start date must be a date (YYYY-MM-DD)".to_string())
        );
    }

    #[test]
    fn test_max_length_runs_after_required() {
        let snap = snapshot(&[("title", "toolong".into())]);
        assert_eq!(
            rules().validate_field(&registry(), "title", &snap, FormMode::Create),
            Some("Title must be at most 5 characters".to_string())
        );
    }

    #[test]
    fn test_dependents_of() {
        assert_eq!(rules().dependents_of("start"), vec!["end"]);
        assert!(rules().dependents_of("title").is_empty());
    }

    #[test]
    fn test_unknown_field_has_no_error() {
        assert!(rules()
            .validate_field(&registry(), "missing", &snapshot(&[]), FormMode::Create)
            .is_none());
    }
}
