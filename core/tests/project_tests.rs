mod common;

use common::FIVE_MINUTE_ENGLISH;
use std::fs;
use tempfile::TempDir;
use wordclock::{
    ClockSettings, DesignSession, Project, ProjectError, RunControl, SCHEMA_VERSION,
    SequenceConfig, SequenceError, SuperSequence,
};

fn built_session() -> DesignSession {
    built_session_with(SequenceConfig::fastest())
}

fn built_session_with(config: SequenceConfig) -> DesignSession {
    let mut session = DesignSession::new(config);
    session
        .select_clock(FIVE_MINUTE_ENGLISH, ClockSettings::default())
        .unwrap();
    let mut control = RunControl::unbounded();
    session.sequence(false, &mut control).unwrap();
    session
}

#[test]
fn saved_project_reloads_into_an_equivalent_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clock.json");
    let session = built_session();
    let project = session.project().unwrap();
    project.save(&path).unwrap();

    let loaded = Project::load(&path).unwrap();
    assert_eq!(loaded, project);
    assert_eq!(loaded.schema_version, SCHEMA_VERSION);

    let mut restored = DesignSession::default();
    restored.restore(&loaded).unwrap();
    assert_eq!(
        restored.cached_sequence().unwrap().as_string(),
        session.cached_sequence().unwrap().as_string()
    );
}

#[test]
fn merged_words_survive_save_and_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("thorough.json");
    let session = built_session_with(SequenceConfig::most_thorough());
    let project = session.project().unwrap();
    assert!(
        project.aliases.iter().any(|list| !list.is_empty()),
        "substring merging should have folded at least one word"
    );
    assert_eq!(
        project.aliases.len(),
        project.supersequence.as_deref().unwrap().split_whitespace().count()
    );
    project.save(&path).unwrap();

    let loaded = Project::load(&path).unwrap();
    assert_eq!(loaded.aliases, project.aliases);
    let mut restored = DesignSession::default();
    restored.restore(&loaded).unwrap();
    let sequence = restored.cached_sequence().unwrap();
    assert!(sequence.sanity_check());
    assert_eq!(sequence.as_string(), project.supersequence.unwrap());
}

#[test]
fn aliases_that_do_not_fit_the_sequence_are_rejected() {
    let mut project = built_session_with(SequenceConfig::most_thorough())
        .project()
        .unwrap();
    let expected = project.aliases.len();
    project.aliases.pop();

    let mut session = DesignSession::default();
    let err = session.restore(&project).unwrap_err();
    assert_eq!(
        err,
        SequenceError::AliasMismatch {
            expected,
            found: expected - 1
        }
    );
    assert_eq!(err.code(), "WCLK_LOAD_002");
}

#[test]
fn edited_sequence_that_loses_a_phrase_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clock.json");
    let mut project = built_session().project().unwrap();
    let text = project.supersequence.take().unwrap();
    let damaged = text.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    project.supersequence = Some(damaged);
    project.save(&path).unwrap();

    let loaded = Project::load(&path).unwrap();
    let mut session = DesignSession::default();
    let err = session.restore(&loaded).unwrap_err();
    assert!(matches!(err, SequenceError::InvalidSavedSequence { .. }), "{err}");
    assert_eq!(err.code(), "WCLK_LOAD_001");
}

#[test]
fn saved_text_and_pool_round_trip_through_from_saved() {
    let session = built_session();
    let seq = session.cached_sequence().unwrap();
    let again = SuperSequence::from_saved(&seq.as_string(), seq.sanity_pool()).unwrap();
    assert_eq!(again.as_string(), seq.as_string());
    assert!(again.sanity_check());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Project::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ProjectError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn future_schema_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("future.json");
    let mut project = built_session().project().unwrap();
    project.schema_version = SCHEMA_VERSION + 1;
    fs::write(&path, project.to_json().unwrap()).unwrap();

    let err = Project::load(&path).unwrap_err();
    assert!(matches!(err, ProjectError::SchemaMismatch { .. }));
}
