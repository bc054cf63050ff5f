mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use wordclock::{ApproxMethod, ClockSettings, SequenceError};

#[derive(Parser)]
#[command(name = "wordclock")]
#[command(about = "Design word-clock panels: phrase dumps, statistics and supersequences")]
#[command(version)]
pub struct Cli {
    #[arg(long, short, global = true, action = clap::ArgAction::Count, help = "Log more (-v info, -vv debug)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List the available clock modules")]
    Clocks {
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
    #[command(about = "Print the sentence a clock shows at a given time")]
    Phrase {
        #[command(flatten)]
        clock: ClockArgs,
        #[arg(help = "Time of day as HH:MM (24h)")]
        time: String,
    },
    #[command(about = "Show statistics over a clock's sentences")]
    Analyze {
        #[command(flatten)]
        clock: ClockArgs,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
    #[command(about = "Build the supersequence for a clock")]
    Build {
        #[command(flatten)]
        clock: ClockArgs,
        #[arg(long, help = "Skip the fine redundancy pass")]
        fast: bool,
        #[arg(long, help = "Run every pass, including substring merging")]
        thorough: bool,
        #[arg(long, help = "Merge words contained in other words")]
        substring_merge: bool,
        #[arg(long, value_name = "SECONDS", help = "Abort the build after this many seconds")]
        timeout: Option<u32>,
        #[arg(long, help = "Show progress on stderr")]
        progress: bool,
        #[arg(long, short, value_name = "PATH", help = "Save the result as a project file")]
        output: Option<String>,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
    #[command(about = "Validate a saved project file")]
    Check {
        #[arg(help = "Path to the project file")]
        path: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Args, Clone)]
pub struct ClockArgs {
    #[arg(long, short, default_value = "Standard English 12h", help = "Clock module name")]
    pub clock: String,
    #[arg(long, short, default_value_t = 1, help = "Time resolution in minutes")]
    pub resolution: u32,
    #[arg(long, value_enum, default_value = "closest", help = "How times are approximated")]
    pub approx: ApproxArg,
}

impl ClockArgs {
    pub fn settings(&self) -> ClockSettings {
        ClockSettings::new(self.resolution, self.approx.into())
    }
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ApproxArg {
    Closest,
    Last,
}

impl From<ApproxArg> for ApproxMethod {
    fn from(arg: ApproxArg) -> Self {
        match arg {
            ApproxArg::Closest => ApproxMethod::Closest,
            ApproxArg::Last => ApproxMethod::Last,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clocks { format } => commands::clocks::run(format),
        Commands::Phrase { clock, time } => commands::phrase::run(&clock, &time),
        Commands::Analyze { clock, format } => commands::analyze::run(&clock, format),
        Commands::Build {
            clock,
            fast,
            thorough,
            substring_merge,
            timeout,
            progress,
            output,
            format,
        } => commands::build::run(commands::build::BuildOptions {
            clock,
            fast,
            thorough,
            substring_merge,
            timeout,
            progress,
            output,
            format,
        }),
        Commands::Check { path, format } => commands::check::run(&path, format),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

/// `RUST_LOG` wins over `-v`; without either only warnings are shown.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

/// 1 for an aborted run, 3 for an engine defect, 2 for everything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    if is_aborted(err) {
        1
    } else if is_internal_error(err) {
        3
    } else {
        2
    }
}

fn is_aborted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<SequenceError>()
            .is_some_and(SequenceError::is_aborted)
    })
}

fn is_internal_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<SequenceError>()
            .is_some_and(SequenceError::is_internal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use wordclock::AbortReason;

    #[test]
    fn asymmetric_merge_exits_3_through_context() {
        let err = Err::<(), _>(SequenceError::AsymmetricMerge {
            left: "b d b d d c b c".into(),
            right: "b d b d d d c b c".into(),
        })
        .context("Failed to build the supersequence")
        .unwrap_err();
        assert!(is_internal_error(&err));
        assert!(!is_aborted(&err));
        assert_eq!(exit_status(&err), 3);
    }

    #[test]
    fn aborted_and_user_errors_keep_their_codes() {
        let aborted = anyhow::Error::from(SequenceError::Aborted {
            phase: "merging".into(),
            reason: AbortReason::TimedOut,
        });
        assert_eq!(exit_status(&aborted), 1);

        let user = anyhow::Error::from(SequenceError::TimeOutOfRange {
            hours: 3,
            minutes: 75,
        });
        assert_eq!(exit_status(&user), 2);
        assert_eq!(exit_status(&anyhow::anyhow!("bad flag")), 2);
    }
}
