use wordclock::{ClockRegistry, ClockSettings, RunControl, SequenceConfig, build_supersequence};

fn usage() -> ! {
    eprintln!("Usage: basic_build [CLOCK NAME]");
    std::process::exit(2);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = ClockRegistry::builtin();
    let name = match std::env::args().nth(1) {
        Some(arg) if arg == "--help" => usage(),
        Some(arg) => arg,
        None => "English 5 minute resolution".to_string(),
    };

    let clock = registry.instantiate(&name, ClockSettings::default())?;
    let phrases = clock.phrases_dump()?;

    let config = SequenceConfig::default();
    let mut control = RunControl::new(&config);
    let sequence = build_supersequence(&phrases, &config, &mut control)?;

    println!("{sequence}");
    println!("elements: {}", sequence.len());
    println!("chars: {}", sequence.char_length());
    Ok(())
}
