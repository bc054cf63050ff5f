//! Clock modules: deterministic generators of the sentence spoken at each
//! minute of the day.

mod english;
mod registry;

pub use english::{FiveMinuteEnglish, PlainEnglish};
pub use registry::{ClockFactory, ClockRegistry};

use crate::error::SequenceError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// How a time is snapped to the clock resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApproxMethod {
    /// Nearest multiple; halves round up.
    #[default]
    Closest,
    /// Most recent multiple.
    Last,
}

impl std::fmt::Display for ApproxMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApproxMethod::Closest => f.write_str("closest"),
            ApproxMethod::Last => f.write_str("last"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// Resolution in minutes.
    pub resolution: u32,
    pub approx: ApproxMethod,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            resolution: 1,
            approx: ApproxMethod::Closest,
        }
    }
}

impl ClockSettings {
    pub fn new(resolution: u32, approx: ApproxMethod) -> Self {
        Self { resolution, approx }
    }

    /// Snaps `hours:minutes` to the resolution. The hour may come back as 24
    /// when closest rounding crosses midnight.
    ///
    /// Only times of day are accepted: hours `0..=23`, minutes `0..=59`.
    pub fn approximate(&self, hours: u32, minutes: u32) -> Result<(u32, u32), SequenceError> {
        if hours > 23 || minutes > 59 {
            return Err(SequenceError::TimeOutOfRange { hours, minutes });
        }
        let res = u64::from(self.resolution.max(1));
        let input = u64::from(hours * 60 + minutes);
        let output = match self.approx {
            ApproxMethod::Closest => (input + res / 2) / res * res,
            ApproxMethod::Last => input / res * res,
        };
        // output <= input + res, so output / 60 fits in u32
        Ok(((output / 60) as u32, (output % 60) as u32))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockMetadata {
    pub name: &'static str,
    pub language: &'static str,
    pub authors: &'static str,
    pub description: &'static str,
}

/// Lookup table from key ranges to words.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    entries: Vec<(RangeInclusive<u32>, &'static str)>,
}

impl WordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key `i` maps to `words[i]`.
    pub fn sequential(words: &[&'static str]) -> Self {
        let entries = words
            .iter()
            .enumerate()
            .map(|(i, &word)| (i as u32..=i as u32, word))
            .collect();
        Self { entries }
    }

    pub fn with(mut self, keys: RangeInclusive<u32>, word: &'static str) -> Self {
        self.entries.push((keys, word));
        self
    }

    pub fn word(&self, key: u32) -> Result<&'static str, SequenceError> {
        self.entries
            .iter()
            .find(|(keys, _)| keys.contains(&key))
            .map(|(_, word)| *word)
            .ok_or(SequenceError::KeyOutOfRange { key })
    }
}

/// A phrase generator for one language and style.
pub trait ClockModule {
    fn metadata(&self) -> &ClockMetadata;

    fn settings(&self) -> ClockSettings;

    /// The sentence for an already approximated time.
    fn build_phrase(&self, hours: u32, minutes: u32) -> Result<String, SequenceError>;

    fn time_phrase(&self, hours: u32, minutes: u32) -> Result<String, SequenceError> {
        let (hours, minutes) = self.settings().approximate(hours, minutes)?;
        self.build_phrase(hours, minutes)
    }

    /// Every sentence of the day, one per minute starting at 00:00.
    fn phrases_dump(&self) -> Result<Vec<String>, SequenceError> {
        (0..24)
            .flat_map(|h| (0..60).map(move |m| (h, m)))
            .map(|(h, m)| self.time_phrase(h, m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_rounds_half_up_and_last_floors() {
        let closest = ClockSettings::new(5, ApproxMethod::Closest);
        assert_eq!(closest.approximate(3, 12).unwrap(), (3, 10));
        assert_eq!(closest.approximate(3, 13).unwrap(), (3, 15));
        assert_eq!(closest.approximate(23, 58).unwrap(), (24, 0));

        let last = ClockSettings::new(5, ApproxMethod::Last);
        assert_eq!(last.approximate(3, 14).unwrap(), (3, 10));
        assert_eq!(last.approximate(23, 59).unwrap(), (23, 55));
    }

    #[test]
    fn times_outside_the_day_are_rejected() {
        let settings = ClockSettings::new(5, ApproxMethod::Closest);
        assert_eq!(
            settings.approximate(3, 75).unwrap_err(),
            SequenceError::TimeOutOfRange {
                hours: 3,
                minutes: 75
            }
        );
        assert_eq!(
            settings.approximate(24, 0).unwrap_err(),
            SequenceError::TimeOutOfRange {
                hours: 24,
                minutes: 0
            }
        );
        let huge = u32::MAX / 30;
        assert_eq!(
            settings.approximate(huge, 0).unwrap_err().code(),
            crate::error::error_codes::CLOCK_TIME_OUT_OF_RANGE
        );
    }

    #[test]
    fn huge_resolution_does_not_overflow() {
        let closest = ClockSettings::new(u32::MAX, ApproxMethod::Closest);
        assert_eq!(closest.approximate(23, 59).unwrap(), (0, 0));
        let last = ClockSettings::new(u32::MAX, ApproxMethod::Last);
        assert_eq!(last.approximate(23, 59).unwrap(), (0, 0));
    }

    #[test]
    fn zero_resolution_behaves_as_one_minute() {
        let settings = ClockSettings::new(0, ApproxMethod::Closest);
        assert_eq!(settings.approximate(7, 41).unwrap(), (7, 41));
    }

    #[test]
    fn word_table_reports_unknown_keys() {
        let table = WordTable::new().with(1..=1, "minute").with(2..=59, "minutes");
        assert_eq!(table.word(1).unwrap(), "minute");
        assert_eq!(table.word(42).unwrap(), "minutes");
        assert_eq!(table.word(60).unwrap_err(), SequenceError::KeyOutOfRange { key: 60 });
    }
}
