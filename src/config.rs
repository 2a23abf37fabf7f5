// src/config.rs
use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable checked when `NOTION_TOKEN` is not set.
const LEGACY_TOKEN_VAR: &str = "NOTION_API_KEY";

/// Log file used when `--log-file` is not given.
fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("notion_crm.log")
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Address the HTTP server listens on
    #[arg(short, long, env = "NOTION_CRM_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Log file path (defaults to notion_crm.log in the temp dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Notion integration token (falls back to NOTION_API_KEY)
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: Option<String>,

    /// ID or URL of the CRM database
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub database_id: Option<String>,
}

/// Resolved server configuration, validated and ready to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub api_key: ApiKey,
    pub database_id: DatabaseId,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl ServerConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Same as `resolve`, reading fallback variables through `env`.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let token = cli
            .notion_token
            .filter(|token| !token.trim().is_empty())
            .or_else(|| env(LEGACY_TOKEN_VAR).filter(|token| !token.trim().is_empty()))
            .ok_or_else(|| {
                AppError::MissingConfiguration(
                    "NOTION_TOKEN environment variable not set".to_string(),
                )
            })?;

        let database = cli
            .database_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                AppError::MissingConfiguration(
                    "NOTION_DATABASE_ID environment variable not set".to_string(),
                )
            })?;

        Ok(ServerConfig {
            bind: cli.bind,
            api_key: ApiKey::new(token.trim())?,
            database_id: DatabaseId::parse(&database)?,
            log_file: cli.log_file.unwrap_or_else(default_log_file),
            verbose: cli.verbose,
        })
    }
}
