//! # photoproof CLI entry point
//!
//! Parses arguments, installs the tracing subscriber and dispatches to the
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use photoproof_cli::demo::{run_demo, DemoArgs};
use photoproof_cli::relation::{run_relation, RelationArgs};

/// PhotoProof driver: provenance-preserving image authentication with
/// proof-carrying data.
#[derive(Parser, Debug)]
#[command(name = "photoproof", version, about, long_about = None)]
struct Cli {
    /// Verbosity when RUST_LOG is unset. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log events as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Issue, edit and verify photographs end to end.
    Demo(DemoArgs),

    /// Print the compiled compliance relation digest and size.
    Relation(RelationArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result = match cli.command {
        Commands::Demo(args) => run_demo(&args),
        Commands::Relation(args) => run_relation(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
