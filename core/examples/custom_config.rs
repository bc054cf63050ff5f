use std::sync::atomic::AtomicBool;
use wordclock::{
    ApproxMethod, ClockRegistry, ClockSettings, ProgressUpdate, RunControl, SequenceConfig,
    build_supersequence,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let clock = ClockRegistry::builtin().instantiate(
        "Standard English 12h",
        ClockSettings::new(10, ApproxMethod::Last),
    )?;
    let phrases = clock.phrases_dump()?;

    let cfg = SequenceConfig::builder()
        .enable_substring_merging(true)
        .progress_every_pairs(250)
        .timeout_seconds(Some(30))
        .build()?;

    let cancel = AtomicBool::new(false);
    let report = |update: &ProgressUpdate<'_>| {
        if let Some(phase) = update.phase {
            eprintln!("== {phase}");
        }
        if let Some(bar) = update.bar {
            eprintln!("   {:>5.1}% (left: {})", bar * 100.0, update.time.unwrap_or("-"));
        }
    };
    let mut control = RunControl::new(&cfg)
        .with_progress(&report)
        .with_cancel_flag(&cancel);

    let sequence = build_supersequence(&phrases, &cfg, &mut control)?;
    println!("{sequence}");
    Ok(())
}
