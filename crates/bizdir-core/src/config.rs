use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_START_URL: &str =
    "https://www.datoscif.es/empresas-nuevas/empresas-creadas-hoy-en-espana/";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can feed a
/// plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let env = parse_environment(&or_default("BIZDIR_ENV", "development"))?;
    let log_level = or_default("BIZDIR_LOG_LEVEL", "info");

    let start_url = or_default("BIZDIR_START_URL", DEFAULT_START_URL);
    let user_agent = or_default("BIZDIR_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_u64("BIZDIR_REQUEST_TIMEOUT_SECS", "30")?;
    let crawl_delay_ms = parse_u64("BIZDIR_CRAWL_DELAY_MS", "2000")?;
    let crawl_randomize_delay = parse_bool("BIZDIR_CRAWL_RANDOMIZE_DELAY", "true")?;
    let crawl_max_pages = parse_usize("BIZDIR_CRAWL_MAX_PAGES", "200")?;

    let search_url = or_default("BIZDIR_SEARCH_URL", DEFAULT_SEARCH_URL);
    let search_timeout_secs = parse_u64("BIZDIR_SEARCH_TIMEOUT_SECS", "10")?;
    let search_delay_ms = parse_u64("BIZDIR_SEARCH_DELAY_MS", "2000")?;
    let search_max_snippets = parse_usize("BIZDIR_SEARCH_MAX_SNIPPETS", "5")?;

    let batch_size = parse_usize("BIZDIR_BATCH_SIZE", "20")?;
    if batch_size == 0 {
        return Err(invalid("BIZDIR_BATCH_SIZE", "must be at least 1".to_string()));
    }
    let batch_pause_ms = parse_u64("BIZDIR_BATCH_PAUSE_MS", "5000")?;

    Ok(AppConfig {
        env,
        log_level,
        start_url,
        user_agent,
        request_timeout_secs,
        crawl_delay_ms,
        crawl_randomize_delay,
        crawl_max_pages,
        search_url,
        search_timeout_secs,
        search_delay_ms,
        search_max_snippets,
        batch_size,
        batch_pause_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIZDIR_ENV".to_string(),
            reason: format!(
                "unrecognized environment \"{other}\"; expected development, test, or production"
            ),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
