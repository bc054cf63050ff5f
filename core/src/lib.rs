//! Wordclock: supersequence engine for word-clock panels.
//!
//! A word clock spells the time with lit words on a fixed grid of letters.
//! This crate computes one ordered word sequence from which every sentence a
//! clock module produces over the day can be read as an in-order
//! subsequence, and keeps that property intact while the sequence is edited.
//!
//! # Quick Start
//!
//! ```ignore
//! use wordclock::{ClockRegistry, ClockSettings, RunControl, SequenceConfig, build_supersequence};
//!
//! let clock = ClockRegistry::builtin().instantiate("Standard English 12h", ClockSettings::default())?;
//! let phrases = clock.phrases_dump()?;
//! let config = SequenceConfig::default();
//! let mut control = RunControl::new(&config);
//! let sequence = build_supersequence(&phrases, &config, &mut control)?;
//! println!("{sequence}");
//! ```

pub(crate) mod alignment;
mod analysis;
pub mod clock;
mod config;
mod control;
mod error;
mod family;
mod isomorphism;
mod merger;
mod pipeline;
mod progress;
mod project;
mod redundancy;
mod session;
mod supseq;
mod word_pool;

pub use alignment::{MatchingBlock, OpTag, Opcode, SequenceMatcher};
pub use analysis::{MinAvgMax, PanelSize, PhraseStats, analyze_phrases, minimum_panel_size};
pub use clock::{ApproxMethod, ClockMetadata, ClockModule, ClockRegistry, ClockSettings, WordTable};
pub use config::{ConfigError, SequenceConfig, SequenceConfigBuilder};
pub use control::RunControl;
pub use error::{AbortReason, SequenceError, error_codes};
pub use family::family_supersequence;
pub use isomorphism::{Family, IsomorphismKey, group_isomorphic, isomorphism_key, orphans};
pub use merger::{closest_pair, merge_all, merge_closest_pair, merge_pair, splice_into, unique_in_order};
pub use pipeline::{
    PHASE_COARSE, PHASE_FINE, PHASE_SHRINK, PHASE_SUBSTRINGS, build_supersequence, grouping_phase,
};
pub use progress::{NoProgress, ProgressCallback, ProgressUpdate};
pub use project::{Project, ProjectError, SCHEMA_VERSION};
pub use redundancy::{coarse_filter, coarse_filter_to_fixpoint, used_positions};
pub use session::DesignSession;
pub use supseq::{BlockCache, Direction, Element, ElementId, Strip, SuperSequence, Validation};
pub use word_pool::{WordId, WordPool};
