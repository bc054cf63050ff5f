//! Saved design projects.
//!
//! A project records which clock was used, its settings, and the finished
//! supersequence as plain text together with the sanity pool it was built
//! against and the merge aliases of its elements. Loading never trusts the
//! saved sequence: callers rebuild it with
//! [`crate::SuperSequence::from_saved_with_aliases`].

use crate::clock::ClockSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("[WCLK_PROJECT_001] cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[WCLK_PROJECT_002] malformed project file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "[WCLK_PROJECT_003] project schema version {found} is not supported (expected {expected}). Suggestion: rebuild the project with this version."
    )]
    SchemaMismatch { found: u64, expected: u32 },
}

impl ProjectError {
    pub fn code(&self) -> &'static str {
        match self {
            ProjectError::Io { .. } => "WCLK_PROJECT_001",
            ProjectError::Json(_) => "WCLK_PROJECT_002",
            ProjectError::SchemaMismatch { .. } => "WCLK_PROJECT_003",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub schema_version: u32,
    pub clock: String,
    pub settings: ClockSettings,
    pub supersequence: Option<String>,
    #[serde(default)]
    pub sanity_pool: Vec<String>,
    /// One alias list per supersequence word; empty when nothing was merged.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<Vec<String>>,
}

impl Project {
    pub fn new(clock: impl Into<String>, settings: ClockSettings) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            clock: clock.into(),
            settings,
            supersequence: None,
            sanity_pool: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a project, checking the schema version before the rest of the
    /// document.
    pub fn from_json(text: &str) -> Result<Self, ProjectError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let found = value
            .get("schema_version")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0);
        if found != u64::from(SCHEMA_VERSION) {
            return Err(ProjectError::SchemaMismatch {
                found,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        let text = self.to_json()?;
        std::fs::write(path, text).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "project saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
