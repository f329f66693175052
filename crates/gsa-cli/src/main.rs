use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gsa_core::{ConverterConfig, FeatureGates};
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "gsa=info";

#[derive(Parser)]
#[command(
    name = "gsa",
    about = "Convert between allocation service messages and GameServerAllocation resources",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to a gsa.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Feature gate overrides, e.g. "PlayerAllocationFilter=true&CountsAndLists=false".
    /// Applied on top of the config file.
    #[arg(long, global = true)]
    feature_gates: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// AllocationRequest JSON → GameServerAllocation JSON
    RequestToGsa {
        /// Input file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,
    },
    /// GameServerAllocation JSON → AllocationRequest JSON
    GsaToRequest {
        #[arg(short, long, default_value = "-")]
        input: String,
    },
    /// GameServerAllocation JSON (with status) → AllocationResponse JSON.
    ///
    /// Fails with the allocation error and its gRPC code unless the status
    /// state is Allocated.
    GsaToResponse {
        #[arg(short, long, default_value = "-")]
        input: String,
    },
    /// AllocationResponse JSON → GameServerAllocation JSON
    ResponseToGsa {
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Cluster that served the allocation
        #[arg(short, long, default_value = "local")]
        source: String,
    },
    /// Print the effective feature gates
    Gates,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConverterConfig::from_file(path)?,
        None => ConverterConfig::default(),
    };
    init_tracing(&config, cli.log_json)?;

    let gates = resolve_gates(&config, cli.feature_gates.as_deref())?;
    tracing::debug!(%gates, "effective feature gates");

    match cli.command {
        Commands::RequestToGsa { input } => commands::convert::request_to_gsa(&input, &gates),
        Commands::GsaToRequest { input } => commands::convert::gsa_to_request(&input, &gates),
        Commands::GsaToResponse { input } => commands::convert::gsa_to_response(&input),
        Commands::ResponseToGsa { input, source } => {
            commands::convert::response_to_gsa(&input, &source)
        }
        Commands::Gates => commands::gates::print(&gates),
    }
}

fn init_tracing(config: &ConverterConfig, json: bool) -> anyhow::Result<()> {
    let directive = config.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directive))?;

    // Logs go to stderr so stdout stays valid JSON.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

/// Defaults, then the config file, then the command-line overrides.
fn resolve_gates(config: &ConverterConfig, overrides: Option<&str>) -> anyhow::Result<FeatureGates> {
    let gates = config.feature_gates()?;
    Ok(match overrides {
        Some(spec) => gates.merge(&FeatureGates::parse_overrides(spec)?),
        None => gates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsa_core::Feature;

    #[test]
    fn cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn gates_default_without_config() {
        let gates = resolve_gates(&ConverterConfig::default(), None).unwrap();
        assert_eq!(gates, FeatureGates::default());
    }

    #[test]
    fn command_line_overrides_config() {
        let config = ConverterConfig::from_toml_str(
            "[feature_gates]\nCountsAndLists = false\nPlayerAllocationFilter = true\n",
        )
        .unwrap();

        let gates = resolve_gates(&config, Some("CountsAndLists=true")).unwrap();
        assert!(gates.enabled(Feature::CountsAndLists));
        assert!(gates.enabled(Feature::PlayerAllocationFilter));
    }

    #[test]
    fn bad_override_is_an_error() {
        assert!(resolve_gates(&ConverterConfig::default(), Some("Bogus=true")).is_err());
    }

    #[test]
    fn response_to_gsa_parses_source() {
        let cli = Cli::try_parse_from(["gsa", "response-to-gsa", "-i", "resp.json", "-s", "eu"]).unwrap();
        match cli.command {
            Commands::ResponseToGsa { input, source } => {
                assert_eq!(input, "resp.json");
                assert_eq!(source, "eu");
            }
            _ => panic!("expected ResponseToGsa"),
        }
    }
}
