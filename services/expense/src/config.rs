//! Service configuration loaded from `EXPENSE_*` environment variables

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Settings for the HTTP service itself; database settings live in
/// `common::database::DatabaseConfig`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind (`EXPENSE_HOST`, default `0.0.0.0`)
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind (`EXPENSE_PORT`, default 6000)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Secret shared with the auth service for token verification (`EXPENSE_JWT_SECRET`)
    #[serde(default)]
    pub jwt_secret: String,
    /// Apply embedded migrations at startup (`EXPENSE_RUN_MIGRATIONS`, default true)
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    6000
}

fn default_run_migrations() -> bool {
    true
}

impl ServiceConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("EXPENSE"))
    }

    /// Load configuration from an explicit environment source
    pub fn from_source(source: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()
            .context("Failed to read service configuration")?;

        let config: ServiceConfig = settings
            .try_deserialize()
            .context("Invalid service configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            bail!("JWT secret is required (set EXPENSE_JWT_SECRET)");
        }
        Ok(())
    }

    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
