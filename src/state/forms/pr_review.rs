//! Pull request review request form

use super::dependency::{CascadeMode, DependencyGraph};
use super::field::{FieldDef, FieldRegistry, FormPatch};
use super::options::OptionsBinding;
use super::panel::Panel;
use super::schema::FormSchema;
use super::validation::{Requirement, Rule, RuleSet};

#[derive(Debug, Clone)]
pub struct PrReviewForm {
    registry: FieldRegistry,
    dependencies: DependencyGraph,
    panels: Vec<Panel>,
    rules: RuleSet,
    binding: OptionsBinding,
}

impl PrReviewForm {
    pub const ORGANIZATION: &'static str = "organization";
    pub const PROJECT: &'static str = "project";
    pub const PULL_REQUEST: &'static str = "pull_request";
    pub const REVIEWERS: &'static str = "reviewers";
    pub const REQUESTED_ON: &'static str = "requested_on";
    pub const REVIEW_BY: &'static str = "review_by";
    pub const SUMMARY: &'static str = "summary";
    pub const LABELS: &'static str = "labels";
    pub const CONFIRMED: &'static str = "confirmed";

    pub fn new() -> Self {
        let registry = FieldRegistry::new(vec![
            FieldDef::text(Self::ORGANIZATION, "Organization"),
            FieldDef::text(Self::PROJECT, "Project"),
            FieldDef::text(Self::PULL_REQUEST, "Pull request"),
            FieldDef::string_set(Self::REVIEWERS, "Reviewers"),
            FieldDef::text(Self::REQUESTED_ON, "Requested on"),
            FieldDef::text(Self::REVIEW_BY, "Review by"),
            FieldDef::text(Self::SUMMARY, "Summary"),
            FieldDef::string_set(Self::LABELS, "Labels"),
            FieldDef::flag(Self::CONFIRMED, "Reviewer availability confirmed"),
        ]);

        let dependencies = DependencyGraph::new(CascadeMode::Direct)
            .with_edge(Self::ORGANIZATION, &[Self::PROJECT, Self::PULL_REQUEST])
            .with_edge(Self::PROJECT, &[Self::PULL_REQUEST]);

        let panels = vec![
            Panel::new(
                1,
                "Pull Request",
                &[Self::ORGANIZATION, Self::PROJECT, Self::PULL_REQUEST],
            ),
            Panel::new(
                2,
                "Reviewers",
                &[Self::REVIEWERS, Self::REQUESTED_ON, Self::REVIEW_BY],
            ),
            Panel::new(3, "Details", &[Self::SUMMARY, Self::LABELS, Self::CONFIRMED]),
        ];

        let required = || Rule::Required(Requirement::Always);
        let rules = RuleSet::new()
            .field(Self::ORGANIZATION, vec![required()])
            .field(Self::PROJECT, vec![required()])
            .field(Self::PULL_REQUEST, vec![required()])
            .field(Self::REVIEWERS, vec![required()])
            .field(Self::REQUESTED_ON, vec![required(), Rule::Date])
            .field(
                Self::REVIEW_BY,
                vec![required(), Rule::Date, Rule::After(Self::REQUESTED_ON)],
            )
            .field(Self::SUMMARY, vec![required(), Rule::MaxLength(280)])
            .field(Self::CONFIRMED, vec![Rule::Required(Requirement::CreateOnly)]);

        Self {
            registry,
            dependencies,
            panels,
            rules,
            binding: OptionsBinding {
                parent: Self::ORGANIZATION,
                mid: Self::PROJECT,
                leaf: Self::PULL_REQUEST,
            },
        }
    }
}

impl Default for PrReviewForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema for PrReviewForm {
    fn title(&self) -> &'static str {
        "Request Review"
    }

    fn storage_key(&self) -> &'static str {
        "pr-review"
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

/// Pre-population data for an existing review request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrReviewData {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub pull_request: Option<String>,
    pub reviewers: Option<Vec<String>>,
    pub requested_on: Option<String>,
    pub review_by: Option<String>,
    pub summary: Option<String>,
    pub labels: Option<Vec<String>>,
    pub confirmed: Option<bool>,
}

impl From<PrReviewData> for FormPatch {
    fn from(data: PrReviewData) -> Self {
        let mut patch = FormPatch::new();
        patch.set_opt(PrReviewForm::ORGANIZATION, data.organization);
        patch.set_opt(PrReviewForm::PROJECT, data.project);
        patch.set_opt(PrReviewForm::PULL_REQUEST, data.pull_request);
        patch.set_opt(PrReviewForm::REVIEWERS, data.reviewers);
        patch.set_opt(PrReviewForm::REQUESTED_ON, data.requested_on);
        patch.set_opt(PrReviewForm::REVIEW_BY, data.review_by);
        patch.set_opt(PrReviewForm::SUMMARY, data.summary);
        patch.set_opt(PrReviewForm::LABELS, data.labels);
        patch.set_opt(PrReviewForm::CONFIRMED, data.confirmed);
        patch
    }
}
