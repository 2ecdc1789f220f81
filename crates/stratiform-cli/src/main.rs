use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod util;

use util::Reported;

#[derive(Parser)]
#[command(name = "stratiform", about = "Translate Stratiform templates to CloudFormation")]
struct Cli {
    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a template and print the CloudFormation JSON
    ToJson(commands::to_json::Args),
    /// Translate a template and report unresolved references
    Check(commands::check::Args),
    /// List the constructs of a template in source order
    Inspect(commands::inspect::Args),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(level))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::ToJson(args) => commands::to_json::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Reported>() {
                Some(report) => eprintln!("{report}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
