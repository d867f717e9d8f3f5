use crate::app_config::{AppConfig, Environment};
use crate::places::Position;
use crate::ConfigError;

const DEFAULT_BACKEND_URL: &str =
    "https://worldwise-aebd9-default-rtdb.europe-west1.firebasedatabase.app/data";

/// Reads the `WORLDWISE_*` settings, loading a `.env` file first if one exists.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Reads the `WORLDWISE_*` settings from the process environment only.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Assembles an [`AppConfig`] from whatever `lookup` returns for each variable.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_coordinate = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("coordinate must be finite, got {raw}"),
            })
        }
    };

    let parse_url = |var: &str, raw: String| -> Result<String, ConfigError> {
        url::Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        Ok(raw)
    };

    let env = parse_environment(&or_default("WORLDWISE_ENV", "development"));
    let log_level = or_default("WORLDWISE_LOG_LEVEL", "info");
    let backend_url = parse_url(
        "WORLDWISE_BACKEND_URL",
        or_default("WORLDWISE_BACKEND_URL", DEFAULT_BACKEND_URL),
    )?
    .trim_end_matches('/')
    .to_string();
    let request_timeout_secs = parse_u64("WORLDWISE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("WORLDWISE_USER_AGENT", "worldwise/0.1 (place-sync)");
    let geolocation_url = match lookup("WORLDWISE_GEOLOCATION_URL") {
        Ok(raw) if !raw.trim().is_empty() => {
            Some(parse_url("WORLDWISE_GEOLOCATION_URL", raw.trim().to_string())?)
        }
        _ => None,
    };
    let default_center = Position::new(
        parse_coordinate("WORLDWISE_DEFAULT_LAT", "40")?,
        parse_coordinate("WORLDWISE_DEFAULT_LNG", "0")?,
    );

    Ok(AppConfig {
        env,
        log_level,
        backend_url,
        request_timeout_secs,
        user_agent,
        geolocation_url,
        default_center,
    })
}

/// Anything other than `production` or `test` counts as development.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
