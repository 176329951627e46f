//! Configuration handling for the forms front-end

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::forms::OptionsLookup;

/// Which form the front-end opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    #[default]
    IssueAssignment,
    PrReview,
}

impl FormKind {
    pub fn parse(arg: &str) -> Option<Self> {
        match arg {
            "issue" | "assignment" | "issue-assignment" => Some(Self::IssueAssignment),
            "pr" | "review" | "pr-review" => Some(Self::PrReview),
            _ => None,
        }
    }
}

/// User configuration for the forms front-end
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormsConfig {
    /// Keep form values across restarts (default: true)
    pub persist_sessions: Option<bool>,
    /// Directory for persisted sessions; defaults to the cache directory
    pub session_dir: Option<PathBuf>,
    /// JSON file holding the organization/project option lookup
    pub options_file: Option<PathBuf>,
    /// Form opened when none is named on the command line
    pub default_form: Option<FormKind>,
}

impl FormsConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "centy", "centy-forms")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormsConfig = serde_json::from_str(&content)
                    .with_context(|| format!("invalid config at {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn persist_sessions(&self) -> bool {
        self.persist_sessions.unwrap_or(true)
    }

    /// Resolved session directory, if any location is available
    pub fn session_dir(&self) -> Option<PathBuf> {
        self.session_dir.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.cache_dir().join("sessions"))
        })
    }

    /// Read the options lookup named by `options_file`
    pub fn load_options(&self) -> Result<Option<OptionsLookup>> {
        let Some(path) = &self.options_file else {
            return Ok(None);
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path.display()))?;
        let lookup = serde_json::from_str(&content)
            .with_context(|| format!("invalid options file {}", path.display()))?;
        Ok(Some(lookup))
    }
}
