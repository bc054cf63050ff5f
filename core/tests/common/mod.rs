//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use wordclock::{
    ClockRegistry, ClockSettings, RunControl, SequenceConfig, SuperSequence, build_supersequence,
};

pub const PLAIN_ENGLISH: &str = "Standard English 12h";
pub const FIVE_MINUTE_ENGLISH: &str = "English 5 minute resolution";

pub fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

pub fn build(list: &[&str], config: &SequenceConfig) -> SuperSequence {
    let pool = phrases(list);
    let mut control = RunControl::unbounded();
    build_supersequence(&pool, config, &mut control)
        .unwrap_or_else(|e| panic!("pipeline failed for {list:?}: {e}"))
}

pub fn clock_dump(name: &str, settings: ClockSettings) -> Vec<String> {
    ClockRegistry::builtin()
        .instantiate(name, settings)
        .unwrap_or_else(|e| panic!("cannot instantiate {name}: {e}"))
        .phrases_dump()
        .unwrap_or_else(|e| panic!("cannot dump {name}: {e}"))
}

/// Word-level in-order subsequence test, independent of the engine.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut words = haystack.split_whitespace();
    needle
        .split_whitespace()
        .all(|wanted| words.any(|w| w == wanted))
}

pub fn assert_generates_all(sequence: &SuperSequence, pool: &[String]) {
    for phrase in pool {
        assert!(
            sequence.sanity_check_phrases(&[phrase]),
            "'{phrase}' cannot be read off '{sequence}'"
        );
    }
}
