use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use crate::db::{DEFAULT_ADMIN_PASSWORD, DEFAULT_DATABASE_URL};

/// Environment variables set by the hosting platforms we deploy to.
pub const HOSTING_MARKERS: &[&str] = &[
    "RENDER",
    "DYNO",
    "RAILWAY_ENVIRONMENT",
    "FLY_APP_NAME",
    "K_SERVICE",
];

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("SESSION_SECRET must be set in production")]
    MissingSessionSecret,
    #[error("SESSION_SECRET must be at least 64 bytes in production")]
    ShortSessionSecret,
    #[error("SESSION_SECRET appears to be a placeholder value")]
    PlaceholderSessionSecret,
    #[error("ADMIN_PASSWORD must be changed from the default in production")]
    DefaultAdminPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    pub fn detect() -> Self {
        Self::detect_with(|key| env::var(key).ok())
    }

    /// `ENVIRONMENT` wins when set; otherwise any hosting marker means
    /// production.
    pub fn detect_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(explicit) = lookup("ENVIRONMENT") {
            let explicit = explicit.trim().to_ascii_lowercase();
            if !explicit.is_empty() {
                return if explicit == "production" {
                    RunMode::Production
                } else {
                    RunMode::Development
                };
            }
        }

        if HOSTING_MARKERS.iter().any(|marker| lookup(marker).is_some()) {
            RunMode::Production
        } else {
            RunMode::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RunMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: RunMode,
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub static_dir: PathBuf,
    pub admin_password: String,
    pub session_secret: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok().filter(|v| !v.is_empty()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = RunMode::detect_with(&lookup);

        let default_host = if mode.is_production() {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };
        let host_value = lookup("HOST").unwrap_or_else(|| default_host.to_string());
        let host = host_value.parse::<IpAddr>().map_err(|_| ConfigError::Invalid {
            name: "HOST",
            value: host_value.clone(),
        })?;

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(AppConfig {
            mode,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            host,
            port,
            uploads_dir: lookup("UPLOADS_DIR").unwrap_or_else(|| "uploads".into()).into(),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".into()).into(),
            admin_password: lookup("ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into()),
            session_secret: lookup("SESSION_SECRET"),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_environment_overrides_hosting_markers() {
        let mode = RunMode::detect_with(lookup_from(&[
            ("ENVIRONMENT", "development"),
            ("RENDER", "true"),
        ]));
        assert_eq!(mode, RunMode::Development);
    }

    #[test]
    fn hosting_marker_selects_production() {
        for marker in HOSTING_MARKERS {
            let mode = RunMode::detect_with(lookup_from(&[(marker, "1")]));
            assert_eq!(mode, RunMode::Production, "{marker} should imply production");
        }
        assert_eq!(RunMode::detect_with(lookup_from(&[])), RunMode::Development);
    }

    #[test]
    fn defaults_follow_run_mode() {
        let dev = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(dev.bind_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(dev.database_url, DEFAULT_DATABASE_URL);
        assert!(dev.uses_default_admin_password());

        let prod = AppConfig::from_lookup(lookup_from(&[("DYNO", "web.1"), ("PORT", "8080")]))
            .unwrap();
        assert_eq!(prod.bind_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }
}
