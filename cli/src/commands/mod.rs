pub mod analyze;
pub mod build;
pub mod check;
pub mod clocks;
pub mod phrase;

use crate::ClockArgs;
use anyhow::{Context, Result};
use wordclock::{DesignSession, SequenceConfig};

/// A session with the requested clock already selected.
pub(crate) fn open_session(clock: &ClockArgs, config: SequenceConfig) -> Result<DesignSession> {
    let mut session = DesignSession::new(config);
    session
        .select_clock(&clock.clock, clock.settings())
        .with_context(|| format!("Failed to select clock: {}", clock.clock))?;
    Ok(session)
}
