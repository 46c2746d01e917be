use clap::Parser;
use serde::Deserialize;

use crate::{
    commands::Command,
    error::{AppError, Result},
};

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub username: String,
    /// Only expected from `FINTRACK_PASSWORD`; prompted for otherwise.
    pub password: Option<String>,
    /// Log level for the fintrack crates (`error`, `warn`, `info`, `debug`).
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            username: String::new(),
            password: None,
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// `tracing_subscriber` filter directive for the configured level.
    pub fn log_filter(&self) -> String {
        format!(
            "fintrack={level},client={level},engine={level}",
            level = self.level
        )
    }

    /// The configured password, or an interactive prompt on the terminal.
    pub fn password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        let password = rpassword::prompt_password(format!("Password for {}: ", self.username))?;
        if password.is_empty() {
            return Err(AppError::EmptyPassword);
        }
        Ok(password)
    }
}

#[derive(Debug, Parser)]
#[command(name = "fintrack", about = "Personal finance tracker client")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override username (password is never read from CLI).
    #[arg(long, short, global = true)]
    username: Option<String>,
    /// Override log level.
    #[arg(long, global = true)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

pub fn load() -> Result<(AppConfig, Command)> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINTRACK"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }
    if settings.username.trim().is_empty() {
        return Err(AppError::MissingUsername);
    }

    Ok((settings, args.command))
}
