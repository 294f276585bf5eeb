// sitesnap: deterministic full-document screenshots from the command line.
//
// Diagnostics go to stderr through tracing (RUST_LOG, default `warn`); the
// run report goes to stdout.

use std::process::ExitCode;

use sitesnap::{CliOutcome, ConsoleReporter, parse_args, run_capture};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let outcome = match parse_args(std::env::args_os()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    let config = match outcome {
        CliOutcome::Help(text) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        CliOutcome::Run(config) => config,
    };

    match run_capture(&config, &ConsoleReporter::new()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_unexpected() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
