use crate::output::{json, text};
use crate::OutputFormat;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::process::ExitCode;
use wordclock::{DesignSession, Project};

/// What `check` found in a project file.
pub struct CheckSummary {
    pub clock: String,
    pub words: Option<usize>,
    pub phrases: usize,
}

pub fn run(path: &str, format: OutputFormat) -> Result<ExitCode> {
    let project = Project::load(path).with_context(|| format!("Failed to load project: {}", path))?;

    let mut session = DesignSession::default();
    session
        .restore(&project)
        .with_context(|| format!("Project failed validation: {}", path))?;

    let phrases = match session.cached_sequence() {
        Some(sequence) => sequence.sanity_pool().len(),
        None => session.phrases()?.len(),
    };
    let summary = CheckSummary {
        clock: project.clock.clone(),
        words: session.cached_sequence().map(|sequence| sequence.len()),
        phrases,
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => text::write_check_summary(&mut handle, path, &summary)?,
        OutputFormat::Json => json::write_check_summary(&mut handle, path, &summary)?,
    }
    handle.flush()?;

    Ok(ExitCode::from(0))
}
