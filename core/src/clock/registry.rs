use super::english::{FIVE_MINUTE_ENGLISH, PLAIN_ENGLISH};
use super::{ClockMetadata, ClockModule, ClockSettings, FiveMinuteEnglish, PlainEnglish};
use crate::error::SequenceError;
use std::collections::BTreeSet;

pub type ClockFactory = fn(ClockSettings) -> Box<dyn ClockModule>;

struct Entry {
    metadata: &'static ClockMetadata,
    factory: ClockFactory,
}

/// Table of available clock modules, resolved by name.
pub struct ClockRegistry {
    entries: Vec<Entry>,
}

impl ClockRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The clocks shipped with the crate.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(&PLAIN_ENGLISH, |settings| Box::new(PlainEnglish::new(settings)));
        registry.register(&FIVE_MINUTE_ENGLISH, |_| Box::new(FiveMinuteEnglish::new()));
        registry
    }

    /// Adds a clock. A later registration under the same name replaces the
    /// earlier one.
    pub fn register(&mut self, metadata: &'static ClockMetadata, factory: ClockFactory) {
        self.entries.retain(|entry| entry.metadata.name != metadata.name);
        self.entries.push(Entry { metadata, factory });
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.metadata.name).collect()
    }

    pub fn languages(&self) -> BTreeSet<&'static str> {
        self.entries
            .iter()
            .map(|entry| entry.metadata.language)
            .collect()
    }

    pub fn names_for_language(&self, language: &str) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.metadata.language == language)
            .map(|entry| entry.metadata.name)
            .collect()
    }

    pub fn all_metadata(&self) -> impl Iterator<Item = &'static ClockMetadata> + '_ {
        self.entries.iter().map(|entry| entry.metadata)
    }

    pub fn metadata(&self, name: &str) -> Result<&'static ClockMetadata, SequenceError> {
        self.find(name).map(|entry| entry.metadata)
    }

    pub fn instantiate(
        &self,
        name: &str,
        settings: ClockSettings,
    ) -> Result<Box<dyn ClockModule>, SequenceError> {
        let entry = self.find(name)?;
        tracing::debug!(clock = name, resolution = settings.resolution, approx = %settings.approx, "instantiating clock");
        Ok((entry.factory)(settings))
    }

    fn find(&self, name: &str) -> Result<&Entry, SequenceError> {
        self.entries
            .iter()
            .find(|entry| entry.metadata.name == name)
            .ok_or_else(|| SequenceError::UnknownClock {
                requested: name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            })
    }
}

impl Default for ClockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ApproxMethod;

    #[test]
    fn builtin_clocks_are_listed_by_language() {
        let registry = ClockRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["Standard English 12h", "English 5 minute resolution"]
        );
        assert_eq!(registry.languages().into_iter().collect::<Vec<_>>(), vec!["English"]);
        assert_eq!(registry.names_for_language("English").len(), 2);
        assert!(registry.names_for_language("Russian").is_empty());
    }

    #[test]
    fn instantiated_clock_uses_requested_settings() {
        let registry = ClockRegistry::builtin();
        let settings = ClockSettings::new(10, ApproxMethod::Last);
        let clock = registry.instantiate("Standard English 12h", settings).unwrap();
        assert_eq!(clock.settings(), settings);
        assert_eq!(clock.time_phrase(9, 19).unwrap(), "It is ten past nine");
    }

    #[test]
    fn unknown_clock_lists_alternatives() {
        let err = ClockRegistry::builtin()
            .instantiate("Klingon", ClockSettings::default())
            .err()
            .unwrap();
        match err {
            SequenceError::UnknownClock {
                requested,
                available,
            } => {
                assert_eq!(requested, "Klingon");
                assert_eq!(available.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
