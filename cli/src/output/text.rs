use crate::commands::build::BuildSummary;
use crate::commands::check::CheckSummary;
use anyhow::Result;
use std::io::Write;
use wordclock::{ClockRegistry, PhraseStats};

pub fn write_clock_list<W: Write>(w: &mut W, registry: &ClockRegistry) -> Result<()> {
    for language in registry.languages() {
        writeln!(w, "{}:", language)?;
        for name in registry.names_for_language(language) {
            let meta = registry.metadata(name)?;
            writeln!(w, "  - \"{}\" by {}", meta.name, meta.authors)?;
            if !meta.description.is_empty() {
                writeln!(w, "      {}", meta.description)?;
            }
        }
    }
    Ok(())
}

pub fn write_stats<W: Write>(w: &mut W, clock: &str, stats: &PhraseStats) -> Result<()> {
    writeln!(w, "Clock: {}", clock)?;
    writeln!(
        w,
        "Sentences: {} ({} unique)",
        stats.sentences, stats.unique_sentences
    )?;
    writeln!(w, "Unique words: {}", stats.unique_words)?;
    writeln!(w, "Characters in unique words: {}", stats.chars_in_unique_words)?;
    writeln!(w)?;
    writeln!(w, "                      (min, avg, max)")?;
    writeln!(w, "Words per sentence:   {}", stats.words_per_sentence)?;
    writeln!(w, "Chars per word:       {}", stats.chars_per_word)?;
    writeln!(w, "Chars per sentence:   {}", stats.chars_per_sentence)?;
    writeln!(w)?;
    let panel = &stats.min_panel;
    writeln!(
        w,
        "Minimum panel: {}x{} ({} spare cells)",
        panel.x, panel.y, panel.extra_cells
    )?;
    Ok(())
}

pub fn write_build_summary<W: Write>(w: &mut W, summary: &BuildSummary) -> Result<()> {
    writeln!(w, "{}", summary.sequence)?;
    writeln!(w)?;
    writeln!(
        w,
        "Summary: {} words, {} characters, covers {} phrases ({})",
        summary.words, summary.chars, summary.phrases, summary.clock
    )?;
    if let Some(path) = &summary.saved_to {
        writeln!(w, "Saved project to {}", path)?;
    }
    Ok(())
}

pub fn write_check_summary<W: Write>(w: &mut W, path: &str, summary: &CheckSummary) -> Result<()> {
    match summary.words {
        Some(words) => writeln!(
            w,
            "{}: OK ({}, {} words generate all {} phrases)",
            path, summary.clock, words, summary.phrases
        )?,
        None => writeln!(
            w,
            "{}: OK ({}, no supersequence saved)",
            path, summary.clock
        )?,
    }
    Ok(())
}
