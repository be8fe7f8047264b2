use lexicon_db::DEFAULT_MAX_CONNECTIONS;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// UTC hour (0-23) at which the daily view reset runs.
    pub reset_hour_utc: u32,
    /// Run the daily reset once and exit instead of looping.
    pub run_once: bool,
    pub log_format: LogFormat,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `DATABASE_URL`         | (required) |
    /// | `DB_MAX_CONNECTIONS`   | `20`       |
    /// | `DAILY_RESET_HOUR_UTC` | `0`        |
    /// | `RUN_ONCE`             | `false`    |
    /// | `LOG_FORMAT`           | `plain`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(v) => match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DB_MAX_CONNECTIONS",
                        value: v,
                        reason: "expected a positive integer",
                    })
                }
            },
        };

        let reset_hour_utc = match lookup("DAILY_RESET_HOUR_UTC") {
            None => 0,
            Some(v) => match v.trim().parse::<u32>() {
                Ok(h) if h < 24 => h,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DAILY_RESET_HOUR_UTC",
                        value: v,
                        reason: "expected an hour between 0 and 23",
                    })
                }
            },
        };

        let run_once = match lookup("RUN_ONCE") {
            None => false,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                name: "RUN_ONCE",
                value: v.clone(),
                reason: "expected true or false",
            })?,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("plain") => LogFormat::Plain,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected plain or json",
                })
            }
        };

        Ok(Self {
            database_url,
            max_connections,
            reset_hour_utc,
            run_once,
            log_format,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
