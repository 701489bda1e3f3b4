//! Runtime configuration loaded from environment variables.

use std::env;

use log::LevelFilter;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the sled database.
    pub data_dir: String,
    /// HTTP listen address.
    pub bind_addr: String,
    /// Username that signs in with the admin role.
    pub admin_username: String,
    /// Install demo events and stats when the store is empty.
    pub seed_demo_data: bool,
    /// Write process logs here instead of stderr.
    pub log_file: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "root".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            admin_username: "admin".to_string(),
            seed_demo_data: false,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, honouring a `.env`
    /// file if present. Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed_demo_data = match lookup("CLUB_PORTAL_SEED") {
            Some(v) => parse_bool("CLUB_PORTAL_SEED", &v)?,
            None => defaults.seed_demo_data,
        };

        let log_level = match lookup("CLUB_PORTAL_LOG_LEVEL") {
            Some(v) => v
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::Invalid("CLUB_PORTAL_LOG_LEVEL", v.clone()))?,
            None => defaults.log_level,
        };

        let admin_username = lookup("CLUB_PORTAL_ADMIN_USERNAME")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.admin_username);
        if admin_username.is_empty() {
            return Err(ConfigError::Invalid("CLUB_PORTAL_ADMIN_USERNAME", admin_username));
        }

        Ok(Self {
            data_dir: lookup("CLUB_PORTAL_DATA_DIR").unwrap_or(defaults.data_dir),
            bind_addr: lookup("CLUB_PORTAL_BIND").unwrap_or(defaults.bind_addr),
            admin_username,
            seed_demo_data,
            log_file: lookup("CLUB_PORTAL_LOG_FILE").filter(|v| !v.trim().is_empty()),
            log_level,
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid(name, value.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).expect("Config should load");
        assert_eq!(config.data_dir, "root");
        assert_eq!(config.admin_username, "admin");
        assert!(!config.seed_demo_data);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("CLUB_PORTAL_DATA_DIR", "/tmp/portal"),
            ("CLUB_PORTAL_SEED", "yes"),
            ("CLUB_PORTAL_LOG_LEVEL", "debug"),
            ("CLUB_PORTAL_ADMIN_USERNAME", "root"),
        ]))
        .expect("Config should load");

        assert_eq!(config.data_dir, "/tmp/portal");
        assert!(config.seed_demo_data);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.admin_username, "root");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("CLUB_PORTAL_SEED", "maybe")])),
            Err(ConfigError::Invalid("CLUB_PORTAL_SEED", _))
        ));
        assert!(Config::from_lookup(lookup_from(&[("CLUB_PORTAL_LOG_LEVEL", "loud")])).is_err());
    }
}
