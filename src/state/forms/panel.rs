//! Panels and progressive disclosure

use super::field::FormSnapshot;
use super::schema::{FormMode, FormSchema};
use super::validation::FieldErrors;

/// An ordered group of fields gated together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// 1-based position
    pub number: usize,
    pub title: &'static str,
    pub field_names: Vec<&'static str>,
}

impl Panel {
    pub fn new(number: usize, title: &'static str, field_names: &[&'static str]) -> Self {
        Self {
            number,
            title,
            field_names: field_names.to_vec(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field_names.iter().any(|f| *f == name)
    }
}

/// Derives panel validity and enablement from a consistent view of the form
pub struct PanelGate<'a> {
    schema: &'a dyn FormSchema,
    snapshot: &'a FormSnapshot,
    display_errors: &'a FieldErrors,
    mode: FormMode,
}

impl<'a> PanelGate<'a> {
    pub fn new(
        schema: &'a dyn FormSchema,
        snapshot: &'a FormSnapshot,
        display_errors: &'a FieldErrors,
        mode: FormMode,
    ) -> Self {
        Self {
            schema,
            snapshot,
            display_errors,
            mode,
        }
    }

    fn panel(&self, number: usize) -> Option<&'a Panel> {
        self.schema.panels().iter().find(|p| p.number == number)
    }

    /// A required field is filled once it holds something other than empty or
    /// its default. Optional fields never hold a panel back.
    fn is_filled(&self, name: &str) -> bool {
        if !self.schema.is_required(name, self.mode) {
            return true;
        }
        let default = self.schema.registry().get(name).map(|def| &def.default);
        self.snapshot
            .get(name)
            .is_some_and(|v| !v.is_empty() && Some(v) != default)
    }

    pub fn is_panel_valid(&self, number: usize) -> bool {
        let Some(panel) = self.panel(number) else {
            return false;
        };
        let filled = panel.field_names.iter().all(|name| self.is_filled(name));
        match self.mode {
            // Edit forms start from a complete record; errors only reflect fresh edits
            FormMode::Edit => filled,
            FormMode::Create => {
                filled
                    && panel
                        .field_names
                        .iter()
                        .all(|name| !self.display_errors.contains_key(*name))
            }
        }
    }

    pub fn is_panel_enabled(&self, number: usize) -> bool {
        if self.panel(number).is_none() {
            return false;
        }
        match self.mode {
            FormMode::Edit => true,
            FormMode::Create => number <= 1 || self.is_panel_valid(number - 1),
        }
    }

    pub fn all_panels_valid(&self) -> bool {
        self.schema
            .panels()
            .iter()
            .all(|p| self.is_panel_valid(p.number))
    }

    /// Panel holding a field, if any
    pub fn panel_of(&self, name: &str) -> Option<usize> {
        self.schema
            .panels()
            .iter()
            .find(|p| p.contains(name))
            .map(|p| p.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::dependency::DependencyGraph;
    use crate::state::forms::field::{FieldDef, FieldRegistry, FieldValue};
    use crate::state::forms::validation::{Requirement, Rule, RuleSet};
    use std::collections::BTreeMap;

    #[derive(Debug)]
    struct Checklist {
        registry: FieldRegistry,
        dependencies: DependencyGraph,
        panels: Vec<Panel>,
        rules: RuleSet,
    }

    impl Checklist {
        fn new() -> Self {
            Self {
                registry: FieldRegistry::new(vec![
                    FieldDef::text("owner", "Owner").with_default("unassigned"),
                    FieldDef::flag("notify", "Notify"),
                ]),
                dependencies: DependencyGraph::default(),
                panels: vec![Panel::new(1, "Owner", &["owner"]), Panel::new(2, "Notify", &["notify"])],
                rules: RuleSet::new()
                    .field("owner", vec![Rule::Required(Requirement::Always)])
                    .field("notify", vec![Rule::Required(Requirement::Always)]),
            }
        }
    }

    impl FormSchema for Checklist {
        fn title(&self) -> &'static str {
            "Checklist"
        }

        fn storage_key(&self) -> &'static str {
            "checklist"
        }

        fn registry(&self) -> &FieldRegistry {
            &self.registry
        }

        fn dependencies(&self) -> &DependencyGraph {
            &self.dependencies
        }

        fn panels(&self) -> &[Panel] {
            &self.panels
        }

        fn rules(&self) -> &RuleSet {
            &self.rules
        }
    }

    fn snapshot(owner: &str) -> FormSnapshot {
        let mut map = BTreeMap::new();
        map.insert("owner".to_string(), FieldValue::from(owner));
        map.insert("notify".to_string(), FieldValue::Flag(false));
        map.into()
    }

    #[test]
    fn test_required_field_at_default_is_not_filled() {
        let schema = Checklist::new();
        let errors = FieldErrors::new();
        let values = snapshot("unassigned");
        let gate = PanelGate::new(&schema, &values, &errors, FormMode::Edit);
        assert!(!gate.is_panel_valid(1));

        let values = snapshot("maria");
        let gate = PanelGate::new(&schema, &values, &errors, FormMode::Edit);
        assert!(gate.is_panel_valid(1));
    }

    #[test]
    fn test_unknown_panel_is_never_enabled() {
        let schema = Checklist::new();
        let errors = FieldErrors::new();
        let values = snapshot("maria");
        for mode in [FormMode::Create, FormMode::Edit] {
            let gate = PanelGate::new(&schema, &values, &errors, mode);
            assert!(gate.is_panel_enabled(1));
            assert!(!gate.is_panel_enabled(0));
            assert!(!gate.is_panel_enabled(3));
        }
    }

    #[test]
    fn test_panel_of() {
        let schema = Checklist::new();
        let errors = FieldErrors::new();
        let values = snapshot("maria");
        let gate = PanelGate::new(&schema, &values, &errors, FormMode::Create);
        assert_eq!(gate.panel_of("notify"), Some(2));
        assert_eq!(gate.panel_of("missing"), None);
    }
}
