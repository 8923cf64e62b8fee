use std::str::FromStr;
use std::time::Duration;

use swapi_importer::ClientConfig;

/// Deployment environment, selected with `ENVIRONMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Development => {
                "swapi_api=debug,swapi_importer=debug,swapi_db=debug,tower_http=debug"
            }
            Environment::Production => "info",
            Environment::Testing => "warn",
        }
    }

    /// Production logs are emitted as JSON lines.
    pub fn json_logs(self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "testing" | "test" => Ok(Environment::Testing),
            _ => Err(ConfigError::Invalid {
                var: "ENVIRONMENT",
                expected: "one of development, production, testing",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: Environment,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Covers `/populatedb`.
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Upstream dataset client settings.
    pub swapi: ClientConfig,
    /// Whether `/health` pings the upstream dataset.
    pub health_check_upstream: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                       |
    /// |-------------------------|-------------------------------|
    /// | `ENVIRONMENT`           | `development`                 |
    /// | `HOST`                  | `0.0.0.0`                     |
    /// | `PORT`                  | `8000`                        |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`       |
    /// | `REQUEST_TIMEOUT_SECS`  | `120`                         |
    /// | `DATABASE_URL`          | composed from `POSTGRES_*`    |
    /// | `DB_MAX_CONNECTIONS`    | `10`                          |
    /// | `SWAPI_BASE_URL`        | `https://swapi.info/api`      |
    /// | `SWAPI_TIMEOUT_SECS`    | `30`                          |
    /// | `SWAPI_MAX_RETRIES`     | `3`                           |
    /// | `SWAPI_RETRY_BASE_MS`   | `500`                         |
    /// | `HEALTH_CHECK_UPSTREAM` | `true`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => Environment::Development,
        };

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse(&lookup, "PORT", 8000, "a valid port number")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 =
            parse(&lookup, "REQUEST_TIMEOUT_SECS", 120, "a whole number of seconds")?;

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => compose_database_url(&lookup),
        };
        let db_max_connections: u32 =
            parse(&lookup, "DB_MAX_CONNECTIONS", 10, "a positive integer")?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }

        let defaults = ClientConfig::default();
        let swapi = ClientConfig {
            base_url: lookup("SWAPI_BASE_URL").unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(parse(
                &lookup,
                "SWAPI_TIMEOUT_SECS",
                30,
                "a whole number of seconds",
            )?),
            max_retries: parse(&lookup, "SWAPI_MAX_RETRIES", 3, "a non-negative integer")?,
            retry_base: Duration::from_millis(parse(
                &lookup,
                "SWAPI_RETRY_BASE_MS",
                500,
                "a whole number of milliseconds",
            )?),
        };

        let health_check_upstream = parse_bool(&lookup, "HEALTH_CHECK_UPSTREAM", true)?;

        Ok(Self {
            environment,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_max_connections,
            swapi,
            health_check_upstream,
        })
    }
}

fn compose_database_url(lookup: &impl Fn(&str) -> Option<String>) -> String {
    let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
    format!(
        "postgres://{}:{}@{}:{}/{}",
        var("POSTGRES_USER", "postgres"),
        var("POSTGRES_PASSWORD", "postgres"),
        var("POSTGRES_HOST", "localhost"),
        var("POSTGRES_PORT", "5432"),
        var("POSTGRES_DB", "swapidb"),
    )
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "a boolean",
            value,
        }),
    }
}
