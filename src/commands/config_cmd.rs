use clap::Subcommand;
use greet_action::config::ActionConfig;
use greet_action::error::Result;
use greet_action::output;

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Get current configuration
    Get,
    /// Set a configuration value
    Set {
        /// Key to set (metadata, output, log)
        key: String,
        /// Value
        value: String,
    },
}

pub fn run(cmd: ConfigCmd, output_format: &str) -> Result<()> {
    match cmd {
        ConfigCmd::Get => {
            let config = ActionConfig::load();
            if output_format == "json" || output_format == "yaml" {
                let value = serde_json::to_value(&config)?;
                output::render(&value, &[], output_format);
            } else {
                println!(
                    "metadata: {}",
                    config
                        .metadata
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(not set)".into())
                );
                println!("output:   {}", config.output.as_deref().unwrap_or("table"));
                println!("log:      {}", config.log.as_deref().unwrap_or("warn"));
            }
        }
        ConfigCmd::Set { key, value } => {
            let mut config = ActionConfig::load();
            config.set(&key, value)?;
            config.save()?;
            output::print_success(&format!(
                "Set '{key}' in {}",
                ActionConfig::config_path().display()
            ));
        }
    }
    Ok(())
}
