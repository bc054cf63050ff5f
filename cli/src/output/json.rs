use crate::commands::build::BuildSummary;
use crate::commands::check::CheckSummary;
use anyhow::Result;
use serde_json::{Value, json};
use std::io::Write;

pub fn write_json<W: Write>(w: &mut W, value: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

pub fn write_build_summary<W: Write>(w: &mut W, summary: &BuildSummary) -> Result<()> {
    write_json(
        w,
        &json!({
            "clock": summary.clock,
            "supersequence": summary.sequence,
            "words": summary.words,
            "chars": summary.chars,
            "phrases": summary.phrases,
            "saved_to": summary.saved_to,
        }),
    )
}

pub fn write_check_summary<W: Write>(w: &mut W, path: &str, summary: &CheckSummary) -> Result<()> {
    write_json(
        w,
        &json!({
            "path": path,
            "valid": true,
            "clock": summary.clock,
            "words": summary.words,
            "phrases": summary.phrases,
        }),
    )
}
