use crate::output::{json, text};
use crate::OutputFormat;
use anyhow::Result;
use std::io::{self, Write};
use std::process::ExitCode;
use wordclock::ClockRegistry;

pub fn run(format: OutputFormat) -> Result<ExitCode> {
    let registry = ClockRegistry::builtin();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => text::write_clock_list(&mut handle, &registry)?,
        OutputFormat::Json => {
            let clocks: Vec<_> = registry.all_metadata().collect();
            json::write_json(&mut handle, &serde_json::to_value(clocks)?)?;
        }
    }
    handle.flush()?;

    Ok(ExitCode::from(0))
}
