use super::open_session;
use crate::output::{json, text};
use crate::{ClockArgs, OutputFormat};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::process::ExitCode;
use wordclock::SequenceConfig;

pub fn run(clock: &ClockArgs, format: OutputFormat) -> Result<ExitCode> {
    let session = open_session(clock, SequenceConfig::default())?;
    let stats = session
        .analysis()
        .with_context(|| format!("Failed to analyze clock: {}", clock.clock))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => text::write_stats(&mut handle, &clock.clock, &stats)?,
        OutputFormat::Json => json::write_json(&mut handle, &serde_json::to_value(&stats)?)?,
    }
    handle.flush()?;

    Ok(ExitCode::from(0))
}
