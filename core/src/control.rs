use crate::config::SequenceConfig;
use crate::error::{AbortReason, SequenceError};
use crate::progress::{ProgressCallback, ProgressUpdate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const PROGRESS_MIN_DELTA: f32 = 0.01;
const CHECK_EVERY_TICKS: u64 = 64;

/// Cooperative run controller threaded through every long pass.
///
/// Owns the progress callback, the cancellation flag and the optional
/// timeout. Passes call [`RunControl::checkpoint`] inside their hot loops;
/// the flag and the clock are only consulted every few ticks.
pub struct RunControl<'a> {
    start: Instant,
    timeout: Option<Duration>,
    progress: Option<&'a dyn ProgressCallback>,
    cancel: Option<&'a AtomicBool>,
    phase: String,
    phase_start: Instant,
    aborted: Option<AbortReason>,
    last_bar: Option<f32>,
    tick: u64,
}

impl<'a> RunControl<'a> {
    pub fn new(config: &SequenceConfig) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            timeout: config
                .timeout_seconds
                .map(|secs| Duration::from_secs(secs as u64)),
            progress: None,
            cancel: None,
            phase: String::new(),
            phase_start: now,
            aborted: None,
            last_bar: None,
            tick: 0,
        }
    }

    /// A controller with no timeout, no callback and no cancellation flag.
    pub fn unbounded() -> Self {
        Self::new(&SequenceConfig {
            timeout_seconds: None,
            ..Default::default()
        })
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    pub fn phase(&self) -> &str {
        &self.phase
    }

    pub(crate) fn begin_phase(&mut self, label: impl Into<String>, bar: Option<f32>, time: Option<&str>) {
        self.phase = label.into();
        self.phase_start = Instant::now();
        self.last_bar = None;
        tracing::info!(phase = %self.phase, "starting pass");
        if let Some(callback) = self.progress {
            let bar = bar.map(clamp_unit);
            self.last_bar = bar;
            callback.on_progress(&ProgressUpdate {
                phase: Some(&self.phase),
                bar,
                time,
            });
        }
    }

    pub(crate) fn pulse(&mut self) {
        if let Some(callback) = self.progress {
            callback.on_progress(&ProgressUpdate::pulse());
        }
    }

    /// Reports `done / total` along with an estimate of the time left in the
    /// current phase. Updates closer than 1% to the previous one are dropped.
    pub(crate) fn report_fraction(&mut self, done: u64, total: u64) {
        let Some(callback) = self.progress else {
            return;
        };
        if total == 0 {
            return;
        }

        let fraction = clamp_unit(done as f32 / total as f32);
        let should_emit = match self.last_bar {
            Some(last) => {
                fraction == 1.0 || fraction < last || (fraction - last) >= PROGRESS_MIN_DELTA
            }
            None => true,
        };
        if !should_emit {
            return;
        }
        self.last_bar = Some(fraction);

        let time = if fraction > 0.0 {
            let elapsed = self.phase_start.elapsed().as_secs_f64();
            let fraction = fraction as f64;
            let left = elapsed / fraction * (1.0 - fraction);
            format!("{} seconds", left.round() as u64)
        } else {
            "---".to_string()
        };
        callback.on_progress(&ProgressUpdate {
            phase: None,
            bar: Some(fraction),
            time: Some(&time),
        });
    }

    /// Returns `Err(Aborted)` once cancellation or the timeout is observed.
    pub(crate) fn checkpoint(&mut self) -> Result<(), SequenceError> {
        if let Some(reason) = self.aborted {
            return Err(self.abort_error(reason));
        }
        self.tick = self.tick.saturating_add(1);
        if self.tick != 1 && self.tick % CHECK_EVERY_TICKS != 0 {
            return Ok(());
        }
        self.check_now()
    }

    /// Like [`RunControl::checkpoint`] but always consults the flag and clock.
    pub(crate) fn check_now(&mut self) -> Result<(), SequenceError> {
        if let Some(reason) = self.aborted {
            return Err(self.abort_error(reason));
        }
        let reason = if self
            .cancel
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
        {
            Some(AbortReason::Cancelled)
        } else if self
            .timeout
            .map(|limit| self.start.elapsed() >= limit)
            .unwrap_or(false)
        {
            Some(AbortReason::TimedOut)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                self.aborted = Some(reason);
                tracing::warn!(phase = %self.phase, %reason, "pass aborted");
                Err(self.abort_error(reason))
            }
            None => Ok(()),
        }
    }

    fn abort_error(&self, reason: AbortReason) -> SequenceError {
        SequenceError::Aborted {
            phase: self.phase.clone(),
            reason,
        }
    }
}

fn clamp_unit(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
