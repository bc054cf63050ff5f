//! The editable supersequence: an ordered list of elements with stable ids,
//! guarded by a pool of phrases it must always be able to generate.

mod element;
mod sequence;

pub use element::{BlockCache, Direction, Element, ElementId, Strip};
pub use sequence::{SuperSequence, Validation};
