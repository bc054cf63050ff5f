mod common;

use common::{assert_generates_all, build, is_subsequence, phrases};
use wordclock::{
    RunControl, SequenceConfig, SuperSequence, coarse_filter, coarse_filter_to_fixpoint,
};

#[test]
fn isomorphic_hours_collapse_into_one_family_sequence() {
    let list = ["it is one o'clock", "it is two o'clock", "it is three o'clock"];
    let seq = build(&list, &SequenceConfig::default());

    assert_eq!(seq.as_string(), "it is one three two o'clock");
    assert!(seq.sanity_check());
    assert_generates_all(&seq, &phrases(&list));
}

#[test]
fn non_isomorphic_pair_is_spliced_by_the_merger() {
    let list = ["red green blue", "red blue yellow"];
    let seq = build(&list, &SequenceConfig::default());

    assert_eq!(seq.as_string(), "red green blue yellow");
    for phrase in list {
        assert!(is_subsequence(phrase, &seq.as_string()), "{phrase}");
    }
}

#[test]
fn coarse_filter_keeps_every_used_word() {
    let sequence = ["a", "b", "c", "d"];
    let kept = coarse_filter(&sequence, &phrases(&["a c", "b d"])).unwrap();
    assert_eq!(kept, vec!["a", "b", "c", "d"]);

    let kept = coarse_filter(&sequence, &phrases(&["a c"])).unwrap();
    assert_eq!(kept, vec!["a", "c"]);
}

#[test]
fn coarse_filter_is_idempotent_on_its_output() {
    let pool = phrases(&["it is one", "it is two o'clock", "one two"]);
    let sequence = ["it", "is", "it", "one", "two", "is", "o'clock", "one", "two"];
    let once = coarse_filter_to_fixpoint(&sequence, &pool, 16).unwrap();
    let twice = coarse_filter(&once, &pool).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn fine_filter_drops_an_unneeded_duplicate() {
    let pool = phrases(&["x y", "x z", "y z"]);
    let mut seq = SuperSequence::new("x y x z", &pool);
    let mut control = RunControl::unbounded();

    assert_eq!(seq.eliminate_redundancies(&mut control).unwrap(), 1);
    assert_eq!(seq.words(), vec!["x", "y", "z"]);
    assert!(seq.sanity_check());
}

#[test]
fn fine_filter_keeps_a_required_duplicate() {
    let pool = phrases(&["x y x", "x z"]);
    let mut seq = SuperSequence::new("x y x z", &pool);
    let mut control = RunControl::unbounded();

    assert_eq!(seq.eliminate_redundancies(&mut control).unwrap(), 0);
    assert_eq!(seq.as_string(), "x y x z");
    assert!(seq.sanity_check());
}

#[test]
fn duplicate_input_phrases_do_not_change_the_result() {
    let once = build(&["it is one", "it is two"], &SequenceConfig::default());
    let twice = build(
        &["it is one", "it is two", "it is one", "it is two"],
        &SequenceConfig::default(),
    );
    assert_eq!(once.as_string(), twice.as_string());
}

#[test]
fn presets_all_produce_valid_sequences() {
    let list = [
        "it is five past one",
        "it is ten past one",
        "it is twenty-five to two",
        "it is five to two",
        "it is two o'clock",
    ];
    for config in [
        SequenceConfig::fastest(),
        SequenceConfig::balanced(),
        SequenceConfig::most_thorough(),
    ] {
        let seq = build(&list, &config);
        assert!(seq.sanity_check(), "{config:?}");
        assert_generates_all(&seq, &phrases(&list));
    }
}
