use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use crate::config::Config;

use super::{CommandError, OutputFormat};

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show,

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# contextdb configuration

# Server base URL, including the API prefix
base_url: http://localhost:8080/api/v1

# API key sent as a bearer token (omit when the server has auth disabled)
# api_key: your-key-here

# Default output format: text or json
output: text
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config, format: Option<OutputFormat>) -> Result<(), CommandError> {
        match &self.command {
            ConfigSubcommand::Show => {
                match format.unwrap_or(config.output.value) {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("base_url: {}", config.base_url.value);
                        println!("  source: {}", config.base_url.source);
                        println!();

                        match &config.api_key {
                            Some(key) => {
                                println!("api_key: {}", mask(&key.value));
                                println!("  source: {}", key.source);
                            }
                            None => println!("api_key: (not set)"),
                        }
                        println!();

                        println!("output: {}", config.output.value);
                        println!("  source: {}", config.output.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'contextdb config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}

/// Shows only the last four characters of a secret.
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
