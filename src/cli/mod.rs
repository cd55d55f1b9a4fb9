pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "toolup")]
#[command(version)]
#[command(about = "Build and install dev tools from source into a home prefix")]
#[command(
    long_about = "Download, build and install development tools into your home prefix,\nthen wire the shell configuration for each. No sudo, no system packages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize toolup configuration
    Init,

    /// Download, build and install a tool
    Install {
        /// Tool to install (see `toolup list`)
        tool: String,

        /// Install the tool's declared dependencies first
        #[arg(long)]
        with_dependencies: bool,
    },

    /// Show a tool's metadata
    Info {
        /// Tool to describe
        tool: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List all installable tools
    List,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Init => commands::init::execute().await,
            Commands::Install {
                tool,
                with_dependencies,
            } => {
                let config = AppConfig::load()?;
                commands::install::execute(&config, &tool, with_dependencies).await
            }
            Commands::Info { tool, json } => commands::info::execute(&tool, json).await,
            Commands::List => commands::list::execute().await,
            Commands::Config { command } => match command {
                ConfigCommands::Show => commands::config::show().await,
                ConfigCommands::Set { key, value } => commands::config::set(key, value).await,
                ConfigCommands::Edit => commands::config::edit().await,
            },
        }
    }
}
