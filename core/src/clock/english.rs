use super::{ApproxMethod, ClockMetadata, ClockModule, ClockSettings, WordTable};
use crate::error::SequenceError;

const NUMBERS: [&str; 31] = [
    "twelve",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "quarter",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
    "twenty",
    "twenty-one",
    "twenty-two",
    "twenty-three",
    "twenty-four",
    "twenty-five",
    "twenty-six",
    "twenty-seven",
    "twenty-eight",
    "twenty-nine",
    "half",
];

pub static PLAIN_ENGLISH: ClockMetadata = ClockMetadata {
    name: "Standard English 12h",
    language: "English",
    authors: "Mac Ryan",
    description: "Plain twelve hours based English clock. Sentences repeat every 12 hours \
                  (there are no 'am' or 'pm').",
};

pub static FIVE_MINUTE_ENGLISH: ClockMetadata = ClockMetadata {
    name: "English 5 minute resolution",
    language: "English",
    authors: "Mac Ryan",
    description: "English clock with five minutes precision.",
};

/// "It is [N past|N to] H [o'clock]" for minutes below 60.
fn english_sentence(numbers: &WordTable, hours: u32, minutes: u32) -> Result<String, SequenceError> {
    let mut words = vec!["It", "is"];
    let mut hours = hours;
    if (1..=30).contains(&minutes) {
        words.push(numbers.word(minutes)?);
        words.push("past");
    } else if minutes > 30 {
        words.push(numbers.word(60u32.saturating_sub(minutes))?);
        words.push("to");
        hours += 1;
    }
    words.push(numbers.word(hours % 12)?);
    if minutes == 0 {
        words.push("o'clock");
    }
    Ok(words.join(" "))
}

/// Twelve-hour English sentences at any resolution.
#[derive(Debug, Clone)]
pub struct PlainEnglish {
    settings: ClockSettings,
    numbers: WordTable,
}

impl PlainEnglish {
    pub fn new(settings: ClockSettings) -> Self {
        Self {
            settings,
            numbers: WordTable::sequential(&NUMBERS),
        }
    }
}

impl ClockModule for PlainEnglish {
    fn metadata(&self) -> &ClockMetadata {
        &PLAIN_ENGLISH
    }

    fn settings(&self) -> ClockSettings {
        self.settings
    }

    fn build_phrase(&self, hours: u32, minutes: u32) -> Result<String, SequenceError> {
        english_sentence(&self.numbers, hours, minutes)
    }
}

/// Same sentences, always snapped to the closest five minutes. Requested
/// settings are ignored.
#[derive(Debug, Clone)]
pub struct FiveMinuteEnglish {
    numbers: WordTable,
}

impl FiveMinuteEnglish {
    pub fn new() -> Self {
        Self {
            numbers: WordTable::sequential(&NUMBERS),
        }
    }
}

impl Default for FiveMinuteEnglish {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockModule for FiveMinuteEnglish {
    fn metadata(&self) -> &ClockMetadata {
        &FIVE_MINUTE_ENGLISH
    }

    fn settings(&self) -> ClockSettings {
        ClockSettings::new(5, ApproxMethod::Closest)
    }

    fn build_phrase(&self, hours: u32, minutes: u32) -> Result<String, SequenceError> {
        english_sentence(&self.numbers, hours, minutes)
    }
}
