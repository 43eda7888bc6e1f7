//! # Paimon CLI
//!
//! *"The King answers every question put to him"*
//!
//! Command-line interface for the Paimon FAQ pipeline.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "paimon")]
#[command(author = "Daemoniorum Engineering")]
#[command(version)]
#[command(about = "FAQ answering with retrieval and model selection", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer a question
    Ask {
        /// The question
        query: String,

        /// Number of contexts to retrieve
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        top_k: Option<i64>,

        /// Model to answer with
        #[arg(short, long)]
        model: Option<String>,

        /// Print the full answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the passages ranked for a question
    Search {
        /// The question
        query: String,

        /// Number of contexts to retrieve
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        top_k: Option<i64>,

        /// Print the contexts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage models
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set default model
    SetModel {
        /// Model name from the catalog
        model: String,
    },

    /// Clear default model
    ClearModel,

    /// Show config file path
    Path,
}

#[derive(Subcommand)]
enum ModelAction {
    /// List available models
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let telemetry_config =
        dantalion::TelemetryConfig::new("paimon").with_log_level(&cli.log_level);

    let telemetry_config = if cli.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };

    dantalion::init_logging(&telemetry_config);

    let cfg = config::Config::load();

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| cfg.server_host.clone());
            let port = port.unwrap_or(cfg.server_port);
            commands::serve(&cfg, host, port).await?;
        }

        Commands::Ask {
            query,
            top_k,
            model,
            json,
        } => {
            commands::ask(&cfg, &query, top_k, model.as_deref(), json).await?;
        }

        Commands::Search { query, top_k, json } => {
            commands::search(&cfg, &query, top_k, json)?;
        }

        Commands::Models { action } => match action {
            ModelAction::List => commands::model_list(&cfg)?,
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => config::show_config(),
            ConfigAction::SetModel { model } => commands::config_set_model(&model)?,
            ConfigAction::ClearModel => commands::config_clear_model()?,
            ConfigAction::Path => println!("{}", config::Config::config_path().display()),
        },
    }

    Ok(())
}
