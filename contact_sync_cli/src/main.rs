use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

use contact_sync_cli::commands::{self, QueueCommand};
use contact_sync_cli::config::{AppConfig, ConfigManager, get_config};
use contact_sync_cli::output::{OutputFormat, OutputFormatter, create_formatter};
use contact_sync_cli::terminal;

#[derive(Parser)]
#[command(name = "contact-sync")]
#[command(author, version, about = "Contact Sync - Guest and order export into the email-marketing import queue", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage new guest checkouts as contacts and export them per website
    GuestSync,

    /// Queue unimported orders per website and mark them imported
    OrderSync {
        /// Maximum number of orders to collect (defaults to orders.batch_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Process an order batch read from a JSON file
    OrderBatch {
        /// JSON file: [{"website_id": 1, "orders": [...]}]
        file: PathBuf,
    },

    /// Inspect the importer queue
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., orders.batch_limit)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., orders.batch_limit)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("contact_sync_core", log::LevelFilter::Debug)
            .filter_module("contact_sync_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Commands::GuestSync => {
            let (config, formatter) = load_runtime(cli.format)?;
            commands::run_guest_sync(config, formatter.as_ref()).await?;
        }
        Commands::OrderSync { limit } => {
            let (config, formatter) = load_runtime(cli.format)?;
            commands::run_order_sync(config, limit, formatter.as_ref()).await?;
        }
        Commands::OrderBatch { file } => {
            let (config, formatter) = load_runtime(cli.format)?;
            commands::run_order_batch(config, &file, formatter.as_ref()).await?;
        }
        Commands::Queue { command } => {
            let (config, formatter) = load_runtime(cli.format)?;
            commands::run_queue_command(command, config, formatter.as_ref()).await?;
        }
        Commands::Config { command } => {
            config_command(command)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Load the configuration and pick a formatter for the sync commands
fn load_runtime(format: OutputFormat) -> Result<(AppConfig, Box<dyn OutputFormatter>)> {
    let config = get_config().context("Failed to load configuration")?;
    let use_color = terminal::should_use_color(config.output.color_enabled);
    Ok((config, create_formatter(format, use_color)))
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => match manager.get(&key) {
            Ok(value) => {
                println!("{value}");
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::Set { key, value } => match manager.set(&key, &value) {
            Ok(()) => {
                eprintln!("{}", format!("Set {key} = {value}").green());
                eprintln!(
                    "Configuration saved to: {}",
                    manager.get_config_path().display()
                );
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::List => match manager.list() {
            Ok(items) => {
                eprintln!("{}", "Configuration:".bold().blue());
                eprintln!("Config file: {}", manager.get_config_path().display());
                eprintln!();

                let mut sections: std::collections::BTreeMap<String, Vec<(String, String)>> =
                    std::collections::BTreeMap::new();
                for (key, value) in items {
                    let (section, rest) = key.split_once('.').unwrap_or(("general", key.as_str()));
                    sections
                        .entry(section.to_string())
                        .or_default()
                        .push((rest.to_string(), value));
                }

                for (section, items) in sections {
                    println!("[{section}]");
                    for (key, value) in items {
                        println!("  {} = {}", key.cyan(), value);
                    }
                }
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
