//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the webhook,
//! loaded via the `config` crate from environment variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `DB_HOST` | `localhost` |
//! | `DB_PORT` | `3306` |
//! | `DB_USER` | required |
//! | `DB_PASSWORD` | empty |
//! | `DB_NAME` | required |
//! | `DB_MAX_CONNECTIONS` | `5` |
//! | `BIND_ADDRESS` | `0.0.0.0` |
//! | `PORT` | `5000` |

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// MySQL host name.
    #[serde(default = "default_db_host")]
    pub db_host: String,

    /// MySQL port.
    #[serde(default = "default_db_port")]
    pub db_port: u16,

    /// MySQL user name.
    pub db_user: String,

    /// MySQL password.
    #[serde(default)]
    pub db_password: String,

    /// Database holding the `lectures` and `course_resources` tables.
    pub db_name: String,

    /// Upper bound on pooled connections.
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// Address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Connection options for the MySQL pool.
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    /// The `host:port` pair to bind the listener to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(overrides: &[(&str, &str)]) -> Result<ServerConfig, config::ConfigError> {
        let mut builder = config::Config::builder();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        builder.build()?.try_deserialize()
    }

    #[test]
    fn optional_settings_have_defaults() {
        let config = load(&[("db_user", "timetable"), ("db_name", "university")])
            .expect("config");

        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_password, "");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("db_user", "timetable"),
            ("db_name", "university"),
            ("db_host", "db.internal"),
            ("port", "8080"),
        ])
        .expect("config");

        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_database_name_is_an_error() {
        assert!(load(&[("db_user", "timetable")]).is_err());
    }
}
