mod commands;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::{config_cmd::ConfigCmd, run::RunArgs};
use greet_action::config::ActionConfig;
use greet_action::env::ActionEnv;
use greet_action::output;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_METADATA: &str = "action.yml";

#[derive(Parser)]
#[command(
    name = "greet-action",
    version,
    about = "Greet an input, publish the time, and print the triggering event"
)]
struct Cli {
    /// Action metadata file declaring inputs and outputs
    #[arg(long, env = "GREET_ACTION_METADATA", global = true)]
    metadata: Option<PathBuf>,

    /// Output format for describe/config: table, wide, json, yaml
    #[arg(short, long, env = "GREET_ACTION_OUTPUT", global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the step (default)
    Run(RunArgs),
    /// Show the inputs and outputs declared in the metadata file
    Describe,
    /// Manage local configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
    /// Show version
    Version,
}

/// Level used when `GREET_ACTION_LOG` is unset: the configured one, else
/// `debug` under step debugging, else `warn`.
fn default_log_level<'a>(configured: Option<&'a str>, debug: bool) -> &'a str {
    configured.unwrap_or(if debug { "debug" } else { "warn" })
}

fn init_tracing(configured: Option<&str>) {
    let debug = ActionEnv::from_process().is_debug();
    let filter = EnvFilter::try_from_env("GREET_ACTION_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(configured, debug)));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (cfg, cfg_err) = match ActionConfig::try_load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (ActionConfig::default(), Some(e)),
    };
    init_tracing(cfg.log.as_deref());
    if let Some(e) = cfg_err {
        tracing::warn!("{e}");
    }

    let metadata = cli.metadata.or(cfg.metadata);
    let output_format = cli
        .output
        .or(cfg.output)
        .unwrap_or_else(|| "table".into());

    let result = match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            commands::run::run(args, metadata.as_deref()).map(|outcome| outcome.exit_code())
        }
        Commands::Describe => {
            let path = metadata.unwrap_or_else(|| PathBuf::from(DEFAULT_METADATA));
            commands::describe::run(&path, &output_format).map(|()| 0)
        }
        Commands::Config { cmd } => commands::config_cmd::run(cmd, &output_format).map(|()| 0),
        Commands::Version => {
            println!("greet-action {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_wins_over_step_debugging() {
        assert_eq!(default_log_level(Some("info"), true), "info");
        assert_eq!(default_log_level(None, true), "debug");
        assert_eq!(default_log_level(None, false), "warn");
    }
}
