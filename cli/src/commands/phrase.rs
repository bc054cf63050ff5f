use super::open_session;
use crate::ClockArgs;
use anyhow::{Context, Result, bail};
use std::io::{self, Write};
use std::process::ExitCode;
use wordclock::SequenceConfig;

pub fn run(clock: &ClockArgs, time: &str) -> Result<ExitCode> {
    let (hours, minutes) = parse_time(time)?;
    let session = open_session(clock, SequenceConfig::default())?;
    let sentence = session
        .clock()?
        .time_phrase(hours, minutes)
        .with_context(|| format!("Failed to build the sentence for {}", time))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", sentence)?;

    Ok(ExitCode::from(0))
}

fn parse_time(time: &str) -> Result<(u32, u32)> {
    let Some((h, m)) = time.split_once(':') else {
        bail!("Time must look like HH:MM, got '{}'", time);
    };
    let hours: u32 = h
        .trim()
        .parse()
        .with_context(|| format!("Invalid hours in '{}'", time))?;
    let minutes: u32 = m
        .trim()
        .parse()
        .with_context(|| format!("Invalid minutes in '{}'", time))?;
    if hours > 23 || minutes > 59 {
        bail!("Time out of range: '{}' (expected 00:00 to 23:59)", time);
    }
    Ok((hours, minutes))
}
