//! hashroute CLI
//!
//! ```text
//! hashroute reconcile <template> [--context <location>]
//! hashroute match <pattern> <location>
//! hashroute simulate <scenario.toml>
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use hashroute::config::{load_config, LoggingConfig};
use hashroute::location::reconcile;
use hashroute::observability::logging::init_logging;
use hashroute::routing::Pattern;
use hashroute::scenario::run_scenario;

#[derive(Parser)]
#[command(name = "hashroute")]
#[command(about = "Hash-fragment routing toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a location template against a context location
    Reconcile {
        template: String,
        /// Context location (defaults to the template itself)
        #[arg(short, long)]
        context: Option<String>,
    },
    /// Match a route pattern against a location
    Match { pattern: String, location: String },
    /// Run a scenario file and print its trace as JSON lines
    Simulate { path: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Reconcile { template, context } => {
            init_logging(&LoggingConfig::default())?;
            let context = context.as_deref().unwrap_or(&template);
            println!("{}", reconcile(&template, context));
        }
        Commands::Match { pattern, location } => {
            init_logging(&LoggingConfig::default())?;
            let pattern = Pattern::compile(pattern);
            let params = pattern.captures(&location).map(|values| {
                pattern
                    .param_names()
                    .iter()
                    .cloned()
                    .zip(values)
                    .collect::<hashroute::Params>()
            });
            let output = json!({
                "compiled": pattern.to_string(),
                "matched": params.is_some(),
                "params": params,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Simulate { path } => {
            let config = load_config(&path)?;
            init_logging(&config.logging)?;
            tracing::info!(
                path = %path.display(),
                routes = config.routes.len(),
                steps = config.steps.len(),
                "Scenario loaded"
            );
            for event in run_scenario(&config) {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    Ok(())
}
