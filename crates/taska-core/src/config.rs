use std::path::PathBuf;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// JSON file holding task creation requests to load at startup.
    pub plan_path: Option<PathBuf>,
    /// Role (puesto) names seeded into the store.
    pub roles: Vec<String>,
    /// Shift (turno) names seeded into the store.
    pub shifts: Vec<String>,
    /// Role whose members see every task regardless of their own role.
    pub privileged_role: String,
    /// Role the binary acts as when listing tasks. Defaults to the privileged role.
    pub current_role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Prefix of environment variables read into [`Settings`].
///
/// Nested keys are joined with `__`, so `app.privileged_role` is set by
/// `TASKA_APP__PRIVILEGED_ROLE`. List keys take comma separated values.
pub const ENV_PREFIX: &str = "TASKA";

/// Environment source over the process environment, or over `vars` when given.
fn environment(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("app.roles")
        .with_list_parse_key("app.shifts")
        .ignore_empty(true)
        .try_parsing(true)
        .source(vars)
}

impl Settings {
    /// ## Summary
    /// Loads configuration from an optional `config.toml` and environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::from_sources(
            config::File::with_name("config.toml").required(false),
            environment(None),
        )
    }

    fn from_sources<F>(file: F, env: config::Environment) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("app.roles", vec!["ENCARGADO", "COCINA", "SALA"])?
            .set_default("app.shifts", vec!["MANANA", "TARDE", "NOCHE"])?
            .set_default("app.privileged_role", "ENCARGADO")?
            // TOML file
            .add_source(file)
            // Env file
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
