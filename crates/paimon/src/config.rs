//! Configuration management for the Paimon CLI.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Command-line arguments
//! 2. Environment variables (`PAIMON_*`, plus bare `ENVIRONMENT` and
//!    `CORS_ALLOW_ORIGINS`)
//! 3. Config file (~/.config/paimon/config.toml)
//! 4. Default values

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use malphas::MalphasConfig;
use paimon_core::ModelSpec;
use paimon_server::ServerConfig;
use serde::{Deserialize, Deserializer, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Deployment environment name.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Allowed CORS origins. Accepts a list or a comma-separated string.
    #[serde(default = "default_origins", deserialize_with = "origin_list")]
    pub cors_allow_origins: Vec<String>,

    /// Server host.
    #[serde(default = "default_host")]
    pub server_host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub server_port: u16,

    /// Model active at startup. Falls back to the catalog default.
    #[serde(default)]
    pub default_model: Option<String>,

    /// Default number of retrieved contexts.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Drop contexts scoring below this.
    #[serde(default)]
    pub min_score: Option<f32>,

    /// Maximum context snippets rendered into an answer.
    #[serde(default = "default_max_snippets")]
    pub max_snippets: usize,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_top_k() -> usize {
    3
}

fn default_max_snippets() -> usize {
    3
}

fn origin_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        List(Vec<String>),
        Joined(String),
    }

    let origins = match Origins::deserialize(deserializer)? {
        Origins::List(list) => list,
        Origins::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(origins
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            cors_allow_origins: default_origins(),
            server_host: default_host(),
            server_port: default_port(),
            default_model: None,
            top_k: default_top_k(),
            min_score: None,
            max_snippets: default_max_snippets(),
        }
    }
}

impl Config {
    /// Loads configuration from all sources.
    ///
    /// Reports warnings for configuration errors but falls back to defaults.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::raw().only(&["ENVIRONMENT", "CORS_ALLOW_ORIGINS"]))
            .merge(Env::prefixed("PAIMON_"));

        match Self::extract(&figment) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\x1b[33mWarning:\x1b[0m Configuration error, using defaults");
                eprintln!("  Config file: {}", config_path.display());
                eprintln!("  Error: {e}");
                eprintln!();
                eprintln!("  To fix, edit or delete the config file:");
                eprintln!("    rm {}", config_path.display());
                eprintln!();
                Config::default()
            }
        }
    }

    /// Extracts a configuration from a prepared figment.
    pub fn extract(figment: &Figment) -> Result<Self, figment::Error> {
        figment.extract::<Config>()
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Returns the path to the config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paimon")
    }

    /// Saves the current configuration to the config file.
    pub fn save(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(Self::config_dir())?;

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(Self::config_path(), toml_str)?;
        Ok(())
    }

    /// Sets the default model and saves.
    pub fn set_default_model(&mut self, model: &str) -> Result<(), std::io::Error> {
        self.default_model = Some(model.to_string());
        self.save()
    }

    /// Clears the default model and saves.
    pub fn clear_default_model(&mut self) -> Result<(), std::io::Error> {
        self.default_model = None;
        self.save()
    }

    /// The startup model, falling back to the catalog default.
    pub fn model(&self) -> &str {
        self.default_model
            .as_deref()
            .unwrap_or(ModelSpec::DEFAULT_MODEL)
    }

    /// Pipeline settings derived from this configuration.
    pub fn pipeline(&self) -> MalphasConfig {
        MalphasConfig::default()
            .with_default_model(self.model())
            .with_top_k(self.top_k)
            .with_min_score(self.min_score)
            .with_max_snippets(self.max_snippets)
    }

    /// Server settings derived from this configuration and the listen address.
    pub fn server(&self, host: IpAddr, port: u16) -> ServerConfig {
        ServerConfig::builder()
            .addr(SocketAddr::new(host, port))
            .cors_allow_origins(self.cors_allow_origins.clone())
            .environment(&self.environment)
            .build()
    }
}

/// Prints the current configuration and its sources.
pub fn show_config() {
    let config = Config::load();
    let config_path = Config::config_path();

    println!("Paimon Configuration");
    println!("====================\n");

    println!("Config file: {}", config_path.display());
    if config_path.exists() {
        println!("Status: Found\n");
    } else {
        println!("Status: Not found (using defaults)\n");
    }

    println!("Current settings:");
    println!("  environment: {}", config.environment);
    println!("  cors_allow_origins: {}", config.cors_allow_origins.join(", "));
    println!("  server_host: {}", config.server_host);
    println!("  server_port: {}", config.server_port);
    println!(
        "  default_model: {}",
        config.default_model.as_deref().unwrap_or("(not set)")
    );
    println!("  top_k: {}", config.top_k);
    println!(
        "  min_score: {}",
        config
            .min_score
            .map_or_else(|| "(not set)".to_string(), |s| s.to_string())
    );
    println!("  max_snippets: {}", config.max_snippets);

    println!("\nEnvironment variables:");
    println!("  PAIMON_ENVIRONMENT (or ENVIRONMENT)");
    println!("  PAIMON_CORS_ALLOW_ORIGINS (or CORS_ALLOW_ORIGINS)");
    println!("  PAIMON_SERVER_HOST");
    println!("  PAIMON_SERVER_PORT");
    println!("  PAIMON_DEFAULT_MODEL");
    println!("  PAIMON_TOP_K");
    println!("  PAIMON_MIN_SCORE");
    println!("  PAIMON_MAX_SNIPPETS");
}
