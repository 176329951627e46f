//! Issue assignment form: pick an issue within an organization's project and assign it

use super::dependency::{CascadeMode, DependencyGraph};
use super::field::{FieldDef, FieldRegistry, FormPatch};
use super::options::OptionsBinding;
use super::panel::Panel;
use super::schema::FormSchema;
use super::validation::{Requirement, Rule, RuleSet};

#[derive(Debug, Clone)]
pub struct IssueAssignmentForm {
    registry: FieldRegistry,
    dependencies: DependencyGraph,
    panels: Vec<Panel>,
    rules: RuleSet,
    binding: OptionsBinding,
}

impl IssueAssignmentForm {
    pub const ORGANIZATION: &'static str = "organization";
    pub const PROJECT: &'static str = "project";
    pub const ISSUE: &'static str = "issue";
    pub const ASSIGNEES: &'static str = "assignees";
    pub const START_DATE: &'static str = "start_date";
    pub const DUE_DATE: &'static str = "due_date";
    pub const NOTES: &'static str = "notes";
    pub const ACKNOWLEDGED: &'static str = "acknowledged";

    pub fn new() -> Self {
        let registry = FieldRegistry::new(vec![
            FieldDef::text(Self::ORGANIZATION, "Organization"),
            FieldDef::text(Self::PROJECT, "Project"),
            FieldDef::text(Self::ISSUE, "Issue"),
            FieldDef::string_set(Self::ASSIGNEES, "Assignees"),
            FieldDef::text(Self::START_DATE, "Start date"),
            FieldDef::text(Self::DUE_DATE, "Due date"),
            FieldDef::text(Self::NOTES, "Notes"),
            FieldDef::flag(Self::ACKNOWLEDGED, "Workload acknowledgement"),
        ]);

        let dependencies = DependencyGraph::new(CascadeMode::Direct)
            .with_edge(Self::ORGANIZATION, &[Self::PROJECT, Self::ISSUE])
            .with_edge(Self::PROJECT, &[Self::ISSUE]);

        let panels = vec![
            Panel::new(1, "Issue", &[Self::ORGANIZATION, Self::PROJECT, Self::ISSUE]),
            Panel::new(
                2,
                "Schedule",
                &[Self::ASSIGNEES, Self::START_DATE, Self::DUE_DATE],
            ),
            Panel::new(3, "Confirm", &[Self::NOTES, Self::ACKNOWLEDGED]),
        ];

        let required = || Rule::Required(Requirement::Always);
        let rules = RuleSet::new()
            .field(Self::ORGANIZATION, vec![required()])
            .field(Self::PROJECT, vec![required()])
            .field(Self::ISSUE, vec![required()])
            .field(Self::ASSIGNEES, vec![required()])
            .field(Self::START_DATE, vec![required(), Rule::Date])
            .field(
                Self::DUE_DATE,
                vec![required(), Rule::Date, Rule::After(Self::START_DATE)],
            )
            .field(Self::NOTES, vec![Rule::MaxLength(500)])
            .field(
                Self::ACKNOWLEDGED,
                vec![Rule::Required(Requirement::CreateOnly)],
            );

        Self {
            registry,
            dependencies,
            panels,
            rules,
            binding: OptionsBinding {
                parent: Self::ORGANIZATION,
                mid: Self::PROJECT,
                leaf: Self::ISSUE,
            },
        }
    }
}

impl Default for IssueAssignmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema for IssueAssignmentForm {
    fn title(&self) -> &'static str {
        "Assign Issue"
    }

    fn storage_key(&self) -> &'static str {
        "issue-assignment"
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

    fn options_binding(&self) -> Option<&OptionsBinding> {
        Some(&self.binding)
    }
}

/// Pre-population data for an existing assignment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueAssignmentData {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub issue: Option<String>,
    pub assignees: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub acknowledged: Option<bool>,
}

impl From<IssueAssignmentData> for FormPatch {
    fn from(data: IssueAssignmentData) -> Self {
        let mut patch = FormPatch::new();
        patch.set_opt(IssueAssignmentForm::ORGANIZATION, data.organization);
        patch.set_opt(IssueAssignmentForm::PROJECT, data.project);
        patch.set_opt(IssueAssignmentForm::ISSUE, data.issue);
        patch.set_opt(IssueAssignmentForm::ASSIGNEES, data.assignees);
        patch.set_opt(IssueAssignmentForm::START_DATE, data.start_date);
        patch.set_opt(IssueAssignmentForm::DUE_DATE, data.due_date);
        patch.set_opt(IssueAssignmentForm::NOTES, data.notes);
        patch.set_opt(IssueAssignmentForm::ACKNOWLEDGED, data.acknowledged);
        patch
    }
}
