use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha512};
use time::Duration;
use tower_sessions::{
    cookie::{Key, SameSite},
    service::SignedCookie,
    Expiry, SessionManagerLayer,
};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::warn;

use super::app::{AppConfig, ConfigError, RunMode};

/// Convenience alias for the signed session layer produced by `SessionConfig`.
pub type SessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

const PLACEHOLDER_MARKERS: &[&str] = &["example", "changeme", "default", "secret-key"];

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub expiry: Duration,
    pub name: String,
    secret: Option<String>,
}

impl SessionConfig {
    pub fn for_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Production => SessionConfig {
                secure: true,
                http_only: true,
                same_site: SameSite::Strict,
                expiry: Duration::hours(2),
                name: "__Host-session".to_string(),
                secret: None,
            },
            RunMode::Development => SessionConfig {
                secure: false,
                http_only: true,
                same_site: SameSite::Lax,
                expiry: Duration::days(7),
                name: "session".to_string(),
                secret: None,
            },
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        SessionConfig {
            secret: config.session_secret.clone(),
            ..Self::for_mode(config.mode)
        }
    }

    pub fn create_layer(&self, store: SqliteStore) -> SessionLayer {
        let key = self.signing_key();

        SessionManagerLayer::new(store)
            .with_secure(self.secure)
            .with_http_only(self.http_only)
            .with_same_site(self.same_site)
            .with_name(self.name.clone())
            .with_expiry(Expiry::OnInactivity(self.expiry))
            .with_signed(key)
    }

    fn signing_key(&self) -> Key {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => key_from_secret_bytes(&decode_secret_bytes(secret)),
            _ => {
                warn!("SESSION_SECRET not set; generating ephemeral key (development only)");
                Key::generate()
            }
        }
    }
}

/// Refuse to start a production deployment with development credentials.
pub fn validate_production_config(config: &AppConfig) -> Result<(), ConfigError> {
    if !config.mode.is_production() {
        return Ok(());
    }

    let secret = config
        .session_secret
        .as_deref()
        .ok_or(ConfigError::MissingSessionSecret)?;

    if decode_secret_bytes(secret).len() < 64 {
        return Err(ConfigError::ShortSessionSecret);
    }

    let lowered = secret.to_ascii_lowercase();
    if PLACEHOLDER_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Err(ConfigError::PlaceholderSessionSecret);
    }

    if config.uses_default_admin_password() {
        return Err(ConfigError::DefaultAdminPassword);
    }

    Ok(())
}

fn decode_secret_bytes(secret: &str) -> Vec<u8> {
    STANDARD
        .decode(secret.as_bytes())
        .unwrap_or_else(|_| secret.as_bytes().to_vec())
}

fn key_from_secret_bytes(bytes: &[u8]) -> Key {
    if bytes.len() >= 64 {
        Key::from(&bytes[..64])
    } else {
        let digest = Sha512::digest(bytes);
        Key::from(digest.as_slice())
    }
}
