use std::{fs, process::ExitCode};

use clap::Parser;
use partscript::{error::Error, interpreter::settings::ExecutorSettings, run_recorded, util::text};
use tracing_subscriber::EnvFilter;

/// partscript runs parametric modeling scripts and prints the commands they
/// would send to a geometry engine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells partscript to read the script from the file named by `contents`.
    #[arg(short, long)]
    file: bool,

    /// Maximum number of statements and expressions one pass may evaluate.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Maximum nesting of user function calls.
    #[arg(long)]
    max_call_depth: Option<usize>,

    /// Maximum nesting of expressions being evaluated.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print every submitted modeling command as JSON.
    #[arg(short, long)]
    commands: bool,

    /// Print the root Program Memory as JSON.
    #[arg(short, long)]
    memory: bool,

    /// Increase log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` wins if
    /// set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
                             .with_writer(std::io::stderr)
                             .init();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents.clone()
    };

    let defaults = ExecutorSettings::default();
    let settings = ExecutorSettings { max_steps:      args.max_steps.unwrap_or(defaults.max_steps),
                                      max_call_depth: args.max_call_depth
                                                          .unwrap_or(defaults.max_call_depth),
                                      max_depth:      args.max_depth.unwrap_or(defaults.max_depth), };

    let run = match run_recorded(&script, settings) {
        Ok(run) => run,
        Err(e) => {
            report(&script, &e);
            return ExitCode::FAILURE;
        },
    };

    for value in &run.outcome.shown {
        println!("{value}");
    }
    if args.commands {
        print_json(&run.commands);
    }
    if args.memory {
        print_json(&run.outcome.memory);
    }

    ExitCode::SUCCESS
}

/// Prints `e` with the line and column it points at, followed by the line
/// itself.
fn report(script: &str, e: &Error) {
    let range = e.source_range();
    let (line, column) = text::line_col(script, range.start());
    eprintln!("{line}:{column}: {e}");
    eprintln!("    {}", text::line_of(script, range));
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}
