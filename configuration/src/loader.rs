//! Layered configuration: built-in defaults, `config/default.toml`,
//! `config/<RUN_ENV>.toml`, `HINDI_VIDEO__SECTION__KEY` variables and finally
//! the platform `PORT` variable.

use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use thiserror::Error;

use crate::AppConfig;

pub const CONFIG_ENV_PREFIX: &str = "HINDI_VIDEO";
const CONFIG_DIR_VAR: &str = "HINDI_VIDEO_CONFIG_DIR";
const RUN_ENV_VAR: &str = "RUN_ENV";
const DEFAULT_RUN_ENV: &str = "development";
const SEPARATOR: &str = "__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid value for {key}: {message}")]
    Env { key: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads configuration from the process environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let dir = env::var_os(CONFIG_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config"));
    let run_env = env::var(RUN_ENV_VAR).unwrap_or_else(|_| DEFAULT_RUN_ENV.to_string());
    load_config_from(&dir, &run_env, env::vars())
}

/// Same as [`load_config`] with every input made explicit. Missing files are
/// skipped; unreadable or malformed ones are errors.
pub fn load_config_from<I>(dir: &Path, run_env: &str, vars: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: Map<String, String> = vars.into_iter().collect();

    let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);
    for name in ["default", run_env] {
        let path = dir.join(format!("{name}.toml"));
        tracing::debug!(path = %path.display(), "adding config file layer");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
    }

    let mut config: AppConfig = builder
        .add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator(SEPARATOR)
                .separator(SEPARATOR)
                .try_parsing(true)
                .source(Some(vars.clone())),
        )
        .build()?
        .try_deserialize()?;

    if let Some(value) = vars.get("PORT") {
        config.server.port = value.trim().parse().map_err(|_| ConfigError::Env {
            key: "PORT".to_string(),
            message: format!("`{value}` is not a valid port"),
        })?;
    }

    config.validate()?;
    Ok(config)
}
