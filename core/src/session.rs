use crate::analysis::{analyze_phrases, PhraseStats};
use crate::clock::{ClockModule, ClockRegistry, ClockSettings};
use crate::config::SequenceConfig;
use crate::control::RunControl;
use crate::error::SequenceError;
use crate::pipeline::build_supersequence;
use crate::project::Project;
use crate::supseq::SuperSequence;

/// Holds the state of one design: the active clock, its settings and the
/// supersequence built for it.
///
/// The supersequence is expensive, so it is cached until the clock or its
/// settings change.
pub struct DesignSession {
    registry: ClockRegistry,
    config: SequenceConfig,
    clock: Option<Box<dyn ClockModule>>,
    sequence: Option<SuperSequence>,
}

impl DesignSession {
    pub fn new(config: SequenceConfig) -> Self {
        Self::with_registry(ClockRegistry::builtin(), config)
    }

    pub fn with_registry(registry: ClockRegistry, config: SequenceConfig) -> Self {
        Self {
            registry,
            config,
            clock: None,
            sequence: None,
        }
    }

    pub fn registry(&self) -> &ClockRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Applies to the next build; a cached sequence is kept.
    pub fn set_config(&mut self, config: SequenceConfig) {
        self.config = config;
    }

    pub fn select_clock(&mut self, name: &str, settings: ClockSettings) -> Result<(), SequenceError> {
        let clock = self.registry.instantiate(name, settings)?;
        tracing::info!(clock = name, "clock selected");
        self.clock = Some(clock);
        self.sequence = None;
        Ok(())
    }

    pub fn update_settings(&mut self, settings: ClockSettings) -> Result<(), SequenceError> {
        let name = self.clock()?.metadata().name;
        self.select_clock(name, settings)
    }

    pub fn clock(&self) -> Result<&dyn ClockModule, SequenceError> {
        self.clock.as_deref().ok_or(SequenceError::NoClockSelected)
    }

    pub fn phrases(&self) -> Result<Vec<String>, SequenceError> {
        self.clock()?.phrases_dump()
    }

    pub fn analysis(&self) -> Result<PhraseStats, SequenceError> {
        Ok(analyze_phrases(&self.phrases()?))
    }

    /// Returns the cached supersequence, building it first when there is
    /// none or `force_rerun` is set. An aborted rebuild keeps the previous
    /// result.
    pub fn sequence(
        &mut self,
        force_rerun: bool,
        control: &mut RunControl<'_>,
    ) -> Result<&SuperSequence, SequenceError> {
        if force_rerun || self.sequence.is_none() {
            let phrases = self.phrases()?;
            let built = build_supersequence(&phrases, &self.config, control)?;
            self.sequence = Some(built);
        }
        self.sequence.as_ref().ok_or_else(|| SequenceError::Internal {
            message: "supersequence missing after build".to_string(),
        })
    }

    pub fn cached_sequence(&self) -> Option<&SuperSequence> {
        self.sequence.as_ref()
    }

    /// Mutable access for layout tools; every edit still goes through the
    /// validated mutation API.
    pub fn cached_sequence_mut(&mut self) -> Option<&mut SuperSequence> {
        self.sequence.as_mut()
    }

    pub fn project(&self) -> Result<Project, SequenceError> {
        let clock = self.clock()?;
        let mut project = Project::new(clock.metadata().name, clock.settings());
        if let Some(sequence) = &self.sequence {
            project.supersequence = Some(sequence.as_string());
            project.sanity_pool = sequence.sanity_pool().to_vec();
            project.aliases = sequence.aliases();
        }
        Ok(project)
    }

    /// Rebuilds the session from a saved project. The saved supersequence is
    /// re-validated against its sanity pool, or against the clock's own
    /// dump when the project carries none, with its merge aliases attached.
    pub fn restore(&mut self, project: &Project) -> Result<(), SequenceError> {
        self.select_clock(&project.clock, project.settings)?;
        if let Some(text) = &project.supersequence {
            let pool = if project.sanity_pool.is_empty() {
                self.phrases()?
            } else {
                project.sanity_pool.clone()
            };
            self.sequence = Some(SuperSequence::from_saved_with_aliases(
                text,
                &project.aliases,
                &pool,
            )?);
        }
        Ok(())
    }
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::new(SequenceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ApproxMethod;

    const FIVE_MINUTES: &str = "English 5 minute resolution";

    #[test]
    fn operations_need_a_clock() {
        let session = DesignSession::default();
        assert_eq!(session.phrases().unwrap_err(), SequenceError::NoClockSelected);
        assert!(session.project().is_err());
    }

    #[test]
    fn changing_settings_drops_the_cached_sequence() {
        let mut session = DesignSession::new(SequenceConfig::fastest());
        session.select_clock(FIVE_MINUTES, ClockSettings::default()).unwrap();
        let mut control = RunControl::unbounded();
        session.sequence(false, &mut control).unwrap();
        assert!(session.cached_sequence().is_some());

        session
            .update_settings(ClockSettings::new(10, ApproxMethod::Last))
            .unwrap();
        assert!(session.cached_sequence().is_none());
    }

    #[test]
    fn project_snapshot_restores_into_a_fresh_session() {
        let mut session = DesignSession::new(SequenceConfig::fastest());
        session.select_clock(FIVE_MINUTES, ClockSettings::default()).unwrap();
        let mut control = RunControl::unbounded();
        let built = session.sequence(false, &mut control).unwrap().as_string();
        let project = session.project().unwrap();
        assert_eq!(project.supersequence.as_deref(), Some(built.as_str()));

        let mut restored = DesignSession::default();
        restored.restore(&project).unwrap();
        assert_eq!(restored.cached_sequence().unwrap().as_string(), built);
        assert_eq!(restored.clock().unwrap().metadata().name, FIVE_MINUTES);
    }

    #[test]
    fn tampered_project_is_rejected() {
        let mut project = Project::new(FIVE_MINUTES, ClockSettings::default());
        project.supersequence = Some("It is twelve".into());
        let mut session = DesignSession::default();
        let err = session.restore(&project).unwrap_err();
        assert!(matches!(err, SequenceError::InvalidSavedSequence { .. }));
    }
}
