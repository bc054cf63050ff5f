//! Token-level alignment shared by every pass of the engine.
//!
//! The pipeline leans on one primitive: a greedy longest-matching-block
//! aligner producing a similarity ratio, matching blocks and a full edit
//! script. Grouping, family building and pair merging all consume it:
//!
//! 1. **Isomorphism grouping** (`crate::isomorphism`) keys pairs on their
//!    ratio and matching-block layout.
//! 2. **Family building** (`crate::family`) uses the blocks of the first two
//!    members to tell fixed positions from variable ones.
//! 3. **Greedy merging** (`crate::merger`) walks the opcodes one splice at a
//!    time, re-aligning after each insertion.

pub(crate) mod matcher;

pub use matcher::{MatchingBlock, OpTag, Opcode, SequenceMatcher};
