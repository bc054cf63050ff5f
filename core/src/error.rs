//! Error types shared across the engine.
//!
//! Invariant violations during staged mutations are *not* errors: they come
//! back as `Ok(false)` from the mutation that was rejected. Everything here is
//! either a cancelled run or a caller bug.

use crate::config::ConfigError;
use crate::supseq::{Direction, ElementId};
use thiserror::Error;

pub mod error_codes {
    pub const SEQ_ABORTED: &str = "WCLK_SEQ_001";
    pub const SEQ_EMPTY_POOL: &str = "WCLK_SEQ_002";
    pub const SEQ_UNGENERABLE_PHRASE: &str = "WCLK_SEQ_003";
    pub const SEQ_ASYMMETRIC_MERGE: &str = "WCLK_SEQ_004";
    pub const SEQ_INTERNAL: &str = "WCLK_SEQ_005";
    pub const ELEM_UNKNOWN: &str = "WCLK_ELEM_001";
    pub const ELEM_INDEX_OUT_OF_RANGE: &str = "WCLK_ELEM_002";
    pub const ELEM_INVALID_SHIFT: &str = "WCLK_ELEM_003";
    pub const ELEM_NOT_ADJACENT: &str = "WCLK_ELEM_004";
    pub const ELEM_NOT_MERGEABLE: &str = "WCLK_ELEM_005";
    pub const LOAD_INVALID_SEQUENCE: &str = "WCLK_LOAD_001";
    pub const LOAD_ALIAS_MISMATCH: &str = "WCLK_LOAD_002";
    pub const CLOCK_UNKNOWN: &str = "WCLK_CLOCK_001";
    pub const CLOCK_KEY_OUT_OF_RANGE: &str = "WCLK_CLOCK_002";
    pub const CLOCK_NOT_SELECTED: &str = "WCLK_CLOCK_003";
    pub const CLOCK_TIME_OUT_OF_RANGE: &str = "WCLK_CLOCK_004";
    pub const CONFIG_INVALID: &str = "WCLK_CONFIG_001";
}

/// Why a long-running pass stopped before producing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    Cancelled,
    TimedOut,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::Cancelled => f.write_str("cancelled"),
            AbortReason::TimedOut => f.write_str("timed out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    #[error("[WCLK_SEQ_001] pass '{phase}' {reason}; no usable result was produced")]
    Aborted { phase: String, reason: AbortReason },

    #[error("[WCLK_SEQ_002] the phrase pool is empty. Suggestion: check the clock module output.")]
    EmptyPool,

    #[error("[WCLK_SEQ_003] phrase '{phrase}' cannot be read off the sequence")]
    UngenerablePhrase { phrase: String },

    #[error(
        "[WCLK_SEQ_004] merge directions disagree: '{left}' vs '{right}'. Suggestion: report a bug with the phrase pool."
    )]
    AsymmetricMerge { left: String, right: String },

    #[error("[WCLK_SEQ_005] internal error: {message}. Suggestion: report a bug with the phrase pool.")]
    Internal { message: String },

    #[error("[WCLK_ELEM_001] element {id} is not part of the sequence")]
    UnknownElement { id: ElementId },

    #[error("[WCLK_ELEM_002] position {index} is outside the sequence (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("[WCLK_ELEM_003] element at position {position} cannot shift {direction}")]
    InvalidShift {
        position: usize,
        direction: Direction,
    },

    #[error("[WCLK_ELEM_004] elements at positions {left} and {right} are not adjacent")]
    NotAdjacent { left: usize, right: usize },

    #[error("[WCLK_ELEM_005] '{first}' and '{second}' cannot be merged: neither contains the other")]
    NotMergeable { first: String, second: String },

    #[error("[WCLK_LOAD_001] saved sequence cannot generate phrase '{phrase}'")]
    InvalidSavedSequence { phrase: String },

    #[error("[WCLK_LOAD_002] saved aliases cover {found} elements but the sequence has {expected}")]
    AliasMismatch { expected: usize, found: usize },

    #[error("[WCLK_CLOCK_001] clock '{requested}' not found. Available clocks: {}.", available.join(", "))]
    UnknownClock {
        requested: String,
        available: Vec<String>,
    },

    #[error("[WCLK_CLOCK_002] key {key} is out of range for this word table")]
    KeyOutOfRange { key: u32 },

    #[error("[WCLK_CLOCK_003] no clock module is selected. Suggestion: select a clock first.")]
    NoClockSelected,

    #[error(
        "[WCLK_CLOCK_004] time {hours}:{minutes:02} is not a time of day. Suggestion: use hours 0-23 and minutes 0-59."
    )]
    TimeOutOfRange { hours: u32, minutes: u32 },

    #[error("[WCLK_CONFIG_001] {0}")]
    Config(#[from] ConfigError),
}

impl SequenceError {
    pub fn code(&self) -> &'static str {
        match self {
            SequenceError::Aborted { .. } => error_codes::SEQ_ABORTED,
            SequenceError::EmptyPool => error_codes::SEQ_EMPTY_POOL,
            SequenceError::UngenerablePhrase { .. } => error_codes::SEQ_UNGENERABLE_PHRASE,
            SequenceError::AsymmetricMerge { .. } => error_codes::SEQ_ASYMMETRIC_MERGE,
            SequenceError::Internal { .. } => error_codes::SEQ_INTERNAL,
            SequenceError::UnknownElement { .. } => error_codes::ELEM_UNKNOWN,
            SequenceError::IndexOutOfRange { .. } => error_codes::ELEM_INDEX_OUT_OF_RANGE,
            SequenceError::InvalidShift { .. } => error_codes::ELEM_INVALID_SHIFT,
            SequenceError::NotAdjacent { .. } => error_codes::ELEM_NOT_ADJACENT,
            SequenceError::NotMergeable { .. } => error_codes::ELEM_NOT_MERGEABLE,
            SequenceError::InvalidSavedSequence { .. } => error_codes::LOAD_INVALID_SEQUENCE,
            SequenceError::AliasMismatch { .. } => error_codes::LOAD_ALIAS_MISMATCH,
            SequenceError::UnknownClock { .. } => error_codes::CLOCK_UNKNOWN,
            SequenceError::KeyOutOfRange { .. } => error_codes::CLOCK_KEY_OUT_OF_RANGE,
            SequenceError::NoClockSelected => error_codes::CLOCK_NOT_SELECTED,
            SequenceError::TimeOutOfRange { .. } => error_codes::CLOCK_TIME_OUT_OF_RANGE,
            SequenceError::Config(_) => error_codes::CONFIG_INVALID,
        }
    }

    /// True for cooperative cancellation or timeout; callers should treat it
    /// as "no result yet" rather than a bug.
    pub fn is_aborted(&self) -> bool {
        matches!(self, SequenceError::Aborted { .. })
    }

    /// True for errors that indicate an engine defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SequenceError::AsymmetricMerge { .. } | SequenceError::Internal { .. }
        )
    }
}
