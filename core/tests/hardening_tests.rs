mod common;

use common::{FIVE_MINUTE_ENGLISH, clock_dump, phrases};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use wordclock::{
    AbortReason, ClockSettings, DesignSession, ProgressUpdate, RunControl, SequenceConfig,
    SequenceError, build_supersequence, grouping_phase,
};

#[test]
fn raised_cancel_flag_aborts_the_first_pass() {
    let pool = clock_dump(FIVE_MINUTE_ENGLISH, ClockSettings::default());
    let cancel = AtomicBool::new(true);
    let config = SequenceConfig::default();
    let mut control = RunControl::new(&config).with_cancel_flag(&cancel);

    let err = build_supersequence(&pool, &config, &mut control).unwrap_err();
    assert_eq!(
        err,
        SequenceError::Aborted {
            phase: grouping_phase(1),
            reason: AbortReason::Cancelled,
        }
    );
    assert!(err.is_aborted());
    assert!(!err.is_internal());
    assert!(control.is_aborted());
}

#[test]
fn cancelling_from_the_progress_callback_stops_the_run() {
    let pool = clock_dump(FIVE_MINUTE_ENGLISH, ClockSettings::default());
    let cancel = AtomicBool::new(false);
    let updates = Mutex::new(0usize);
    let callback = |update: &ProgressUpdate<'_>| {
        let mut seen = updates.lock().unwrap();
        *seen += 1;
        if update.bar.is_some_and(|bar| bar >= 0.5) {
            cancel.store(true, Ordering::Relaxed);
        }
    };
    let config = SequenceConfig::builder()
        .progress_every_pairs(100)
        .build()
        .unwrap();
    let mut control = RunControl::new(&config)
        .with_progress(&callback)
        .with_cancel_flag(&cancel);

    let err = build_supersequence(&pool, &config, &mut control).unwrap_err();
    assert!(err.is_aborted(), "expected abort, got {err}");
    assert!(*updates.lock().unwrap() > 1);
}

#[test]
fn aborted_rebuild_keeps_the_previous_sequence() {
    let mut session = DesignSession::new(SequenceConfig::fastest());
    session
        .select_clock(FIVE_MINUTE_ENGLISH, ClockSettings::default())
        .unwrap();
    let mut control = RunControl::unbounded();
    let first = session.sequence(false, &mut control).unwrap().as_string();

    let cancel = AtomicBool::new(true);
    let mut control = RunControl::unbounded().with_cancel_flag(&cancel);
    assert!(session.sequence(true, &mut control).unwrap_err().is_aborted());
    assert_eq!(session.cached_sequence().unwrap().as_string(), first);
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(SequenceError::EmptyPool.code(), "WCLK_SEQ_002");
    let err = SequenceError::Aborted {
        phase: "x".into(),
        reason: AbortReason::TimedOut,
    };
    assert_eq!(err.code(), "WCLK_SEQ_001");
    assert!(err.to_string().starts_with("[WCLK_SEQ_001]"));
    assert!(err.to_string().contains("timed out"));
}

#[test]
fn empty_pool_is_a_user_error() {
    let config = SequenceConfig::default();
    let mut control = RunControl::new(&config);
    let err = build_supersequence(&phrases(&[]), &config, &mut control).unwrap_err();
    assert_eq!(err, SequenceError::EmptyPool);
    assert!(!err.is_internal());
}

#[test]
fn pool_whose_merge_directions_disagree_fails_as_internal() {
    let pool = phrases(&["d e e b", "b d b c b", "d d d c c"]);
    let config = SequenceConfig::default();
    let mut control = RunControl::new(&config);

    let err = build_supersequence(&pool, &config, &mut control).unwrap_err();
    assert!(matches!(err, SequenceError::AsymmetricMerge { .. }), "{err:?}");
    assert_eq!(err.code(), "WCLK_SEQ_004");
    assert!(err.is_internal());
    assert!(!err.is_aborted());
}
