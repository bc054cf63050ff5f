use super::open_session;
use crate::output::{json, text};
use crate::{ClockArgs, OutputFormat};
use anyhow::{Context, Result, bail};
use std::cell::RefCell;
use std::io::{self, Write};
use std::process::ExitCode;
use wordclock::{ProgressCallback, ProgressUpdate, RunControl, SequenceConfig};

pub struct BuildOptions {
    pub clock: ClockArgs,
    pub fast: bool,
    pub thorough: bool,
    pub substring_merge: bool,
    pub timeout: Option<u32>,
    pub progress: bool,
    pub output: Option<String>,
    pub format: OutputFormat,
}

/// What `build` reports once the supersequence is ready.
pub struct BuildSummary {
    pub clock: String,
    pub sequence: String,
    pub words: usize,
    pub chars: usize,
    pub phrases: usize,
    pub saved_to: Option<String>,
}

pub fn run(options: BuildOptions) -> Result<ExitCode> {
    if options.fast && options.thorough {
        bail!("Cannot use both --fast and --thorough flags together");
    }

    let config = build_config(&options)?;
    let mut session = open_session(&options.clock, config.clone())?;

    let reporter = StderrProgress::default();
    let mut control = RunControl::new(&config);
    if options.progress {
        control = control.with_progress(&reporter);
    }

    let built = session.sequence(false, &mut control);
    if options.progress {
        eprintln!();
    }
    let sequence = built.context("Supersequence build failed")?;

    let mut summary = BuildSummary {
        clock: options.clock.clock.clone(),
        sequence: sequence.as_string(),
        words: sequence.len(),
        chars: sequence.char_length(),
        phrases: sequence.sanity_pool().len(),
        saved_to: None,
    };

    if let Some(path) = &options.output {
        session
            .project()?
            .save(path)
            .with_context(|| format!("Failed to save project: {}", path))?;
        summary.saved_to = Some(path.clone());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match options.format {
        OutputFormat::Text => text::write_build_summary(&mut handle, &summary)?,
        OutputFormat::Json => json::write_build_summary(&mut handle, &summary)?,
    }
    handle.flush()?;

    Ok(ExitCode::from(0))
}

fn build_config(options: &BuildOptions) -> Result<SequenceConfig> {
    let base = if options.fast {
        SequenceConfig::fastest()
    } else if options.thorough {
        SequenceConfig::most_thorough()
    } else {
        SequenceConfig::default()
    };
    let config = SequenceConfig {
        enable_substring_merging: base.enable_substring_merging || options.substring_merge,
        timeout_seconds: options.timeout,
        ..base
    };
    config.validate().context("Invalid build configuration")?;
    tracing::debug!(?config, "build configuration");
    Ok(config)
}

/// Single status line on stderr, rewritten in place. Only phase starts carry
/// a label, so the last one is kept for later updates.
#[derive(Default)]
struct StderrProgress {
    phase: RefCell<String>,
}

impl ProgressCallback for StderrProgress {
    fn on_progress(&self, update: &ProgressUpdate<'_>) {
        if let Some(phase) = update.phase {
            *self.phase.borrow_mut() = phase.to_string();
        }
        let phase = self.phase.borrow();
        let mut err = io::stderr().lock();
        let _ = match (update.bar, update.time) {
            (Some(bar), Some(time)) => {
                write!(err, "\r\x1b[2K{} {:>3.0}% ({})", phase, bar * 100.0, time)
            }
            (Some(bar), None) => write!(err, "\r\x1b[2K{} {:>3.0}%", phase, bar * 100.0),
            (None, _) => write!(err, "\r\x1b[2K{} ...", phase),
        };
        let _ = err.flush();
    }
}
