use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the backing table (default: "users")
    pub table_name: String,
    /// Upper bound on any single store call, in milliseconds
    /// (default: 5000)
    pub store_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Backing table name (default: "users")
    /// - `STORE_TIMEOUT_MS` - Per-call store timeout in milliseconds (default: 5000)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME").unwrap_or_else(|_| "users".to_string()),
            store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
        }
    }

    /// Get the store call timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_timeout_conversion() {
        let config = Config {
            table_name: "users".to_string(),
            store_timeout_ms: 250,
        };

        assert_eq!(config.store_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("DYNAMODB_TABLE_NAME");
        env::remove_var("STORE_TIMEOUT_MS");

        let config = Config::from_env();

        assert_eq!(config.table_name, "users");
        assert_eq!(config.store_timeout_ms, 5_000);
    }
}
