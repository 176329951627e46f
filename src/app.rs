//! Application state and key handling for the form front-end

use anyhow::Result;
use centy_forms::state::{
    FieldKind, FieldValue, FormEngine, FormMode, FormPatch, FormSnapshot, IssueAssignmentData,
    OptionsLookup, ParentOptions, PrReviewData,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// The form engine driving every field
    pub engine: FormEngine,
    /// Index of the focused field in panel order
    pub focus: usize,
    /// Pending entry for the focused multi-select field
    pub input: String,
    /// Status line message
    pub status_message: Option<String>,
    /// Payload accepted by the last successful submit
    pub submitted: Option<FormSnapshot>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    pub fn new(engine: FormEngine) -> Self {
        Self {
            engine,
            focus: 0,
            input: String::new(),
            status_message: None,
            submitted: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Field names in panel order
    pub fn field_order(&self) -> Vec<&'static str> {
        self.engine
            .panels()
            .iter()
            .flat_map(|p| p.field_names.iter().copied())
            .collect()
    }

    pub fn focused_field(&self) -> Option<&'static str> {
        self.field_order().get(self.focus).copied()
    }

    /// Blur the focused field and move to the next enabled one
    fn move_focus(&mut self, forward: bool) -> Result<()> {
        if let Some(name) = self.focused_field() {
            self.engine.set_touched(name, true)?;
        }
        self.input.clear();

        let order = self.field_order();
        let count = order.len();
        for step in 1..=count {
            let index = if forward {
                (self.focus + step) % count
            } else {
                (self.focus + count - step % count) % count
            };
            if self.engine.is_field_enabled(order[index]) {
                self.focus = index;
                break;
            }
        }
        Ok(())
    }

    fn submit(&mut self) {
        if self.engine.validate_form() && self.engine.is_form_ready_for_submission() {
            self.engine.set_submitting(true);
            self.submitted = Some(self.engine.get_form_data());
            self.engine.clear_session();
            self.status_message = Some("Form submitted".to_string());
            self.quit = true;
        } else {
            let count = self.engine.validation().display_errors.len();
            self.status_message = Some(format!("{count} field(s) need attention"));
        }
    }

    fn toggle_mode(&mut self) {
        let mode = match self.engine.mode() {
            FormMode::Create => FormMode::Edit,
            FormMode::Edit => FormMode::Create,
        };
        self.engine.set_mode(mode);
        self.status_message = Some(format!("{} mode", mode.label()));
    }

    /// Step through the externally supplied choices for the focused field
    fn cycle_choice(&mut self, name: &str, forward: bool) -> Result<()> {
        let choices = self.engine.choices_for(name);
        if choices.is_empty() {
            self.status_message = Some("No options available".to_string());
            return Ok(());
        }
        let current = self
            .engine
            .value(name)
            .map(FieldValue::as_text)
            .unwrap_or_default();
        let next = match choices.iter().position(|c| c == current) {
            Some(i) if forward => (i + 1) % choices.len(),
            Some(i) => (i + choices.len() - 1) % choices.len(),
            None => 0,
        };
        self.engine.set_field(name, choices[next].as_str())?;
        Ok(())
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => {
                self.engine.reset_form();
                self.input.clear();
                self.focus = 0;
                self.status_message = Some("Form reset".to_string());
            }
            KeyCode::Char('e') if ctrl => self.toggle_mode(),
            KeyCode::Tab => self.move_focus(true)?,
            KeyCode::BackTab => self.move_focus(false)?,
            _ => self.handle_field_key(key)?,
        }
        Ok(())
    }

    fn handle_field_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(name) = self.focused_field() else {
            return Ok(());
        };
        if !self.engine.is_field_enabled(name) {
            self.status_message = Some("Complete the previous panel first".to_string());
            return Ok(());
        }
        let Some(kind) = self.engine.registry().get(name).map(|f| f.kind) else {
            return Ok(());
        };
        let current = self.engine.value(name).cloned().unwrap_or(FieldValue::empty(kind));

        match (kind, key.code) {
            (FieldKind::Text, KeyCode::Left) => self.cycle_choice(name, false)?,
            (FieldKind::Text, KeyCode::Right) => self.cycle_choice(name, true)?,
            (FieldKind::Text, KeyCode::Char(c)) => {
                let mut text = current.as_text().to_string();
                text.push(c);
                self.engine.set_field(name, text)?;
            }
            (FieldKind::Text, KeyCode::Backspace) => {
                let mut text = current.as_text().to_string();
                text.pop();
                self.engine.set_field(name, text)?;
            }
            (FieldKind::StringSet, KeyCode::Char(c)) => self.input.push(c),
            (FieldKind::StringSet, KeyCode::Enter) => {
                let entry = self.input.trim().to_string();
                if !entry.is_empty() {
                    let mut items = current.as_set().to_vec();
                    items.push(entry);
                    self.engine.set_field(name, items)?;
                }
                self.input.clear();
            }
            (FieldKind::StringSet, KeyCode::Backspace) => {
                if self.input.pop().is_none() {
                    let mut items = current.as_set().to_vec();
                    items.pop();
                    self.engine.set_field(name, items)?;
                }
            }
            (FieldKind::Flag, KeyCode::Char(' ') | KeyCode::Enter) => {
                self.engine.set_field(name, !current.as_flag())?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Apply the mode asked for on the command line, then pre-populate an edit
/// session from the existing record unless restored values are in progress
pub fn prepare_session(engine: &mut FormEngine, requested: Option<FormMode>, existing: FormPatch) {
    if let Some(mode) = requested {
        engine.set_mode(mode);
    }
    if engine.mode() == FormMode::Edit && engine.get_form_data() == engine.registry().defaults() {
        for err in engine.set_form_data(existing) {
            tracing::warn!("pre-population skipped a value: {err}");
        }
    }
}

/// Option lookup used when no options file is configured
pub fn demo_options() -> OptionsLookup {
    let entry = |parent: &str, mid: &[&str], leaf: &[&str]| ParentOptions {
        parent: parent.to_string(),
        mid: mid.iter().map(|s| s.to_string()).collect(),
        leaf: leaf.iter().map(|s| s.to_string()).collect(),
    };
    OptionsLookup::new(vec![
        entry("centy-io", &["centy-tui", "centy-daemon"], &["#12", "#31", "#47"]),
        entry("acme", &["storefront", "billing"], &["#3", "#8"]),
    ])
}

/// Existing record used to pre-populate the issue assignment form in edit mode
pub fn demo_assignment() -> IssueAssignmentData {
    IssueAssignmentData {
        organization: Some("centy-io".into()),
        project: Some("centy-tui".into()),
        issue: Some("#31".into()),
        assignees: Some(vec!["maria".into(), "kenji".into()]),
        start_date: Some("2026-10-19".into()),
        due_date: Some("2026-10-30".into()),
        notes: None,
        acknowledged: Some(true),
    }
}

/// Existing record used to pre-populate the review form in edit mode
pub fn demo_review() -> PrReviewData {
    PrReviewData {
        organization: Some("centy-io".into()),
        project: Some("centy-daemon".into()),
        pull_request: Some("#47".into()),
        reviewers: Some(vec!["lena".into()]),
        requested_on: Some("2026-10-16".into()),
        review_by: Some("2026-10-21".into()),
        summary: Some("Switch daemon config to layered loading".into()),
        labels: Some(vec!["config".into()]),
        confirmed: Some(true),
    }
}
