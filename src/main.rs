use clap::Parser;
use std::process::ExitCode;
use topo::cli::{Cli, Commands};
use topo::cli_handlers;
use tracing_subscriber::EnvFilter;

/// Exit code for a graph that has no topological order.
const CYCLE_EXIT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "topo=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sort { graph, run } => {
            let config = graph.into_config(run.algorithm, run.format);
            match cli_handlers::handle_sort(&config) {
                Ok(true) => return ExitCode::from(CYCLE_EXIT),
                Ok(false) => Ok(()),
                Err(e) => Err(e),
            }
        }
        Commands::Trace { graph, run } => {
            cli_handlers::handle_trace(&graph.into_config(run.algorithm, run.format))
        }
        Commands::Step { graph, run, index } => {
            cli_handlers::handle_step(&graph.into_config(run.algorithm, run.format), index)
        }
        Commands::Compare { graph, format } => {
            cli_handlers::handle_compare(&graph.into_config(Default::default(), format))
        }
        Commands::Presets => cli_handlers::handle_presets(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
