//! One-shot notices carried in the session until the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

pub const FLASH_KEY: &str = "_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
            FlashLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn css_class(&self) -> &'static str {
        self.level.as_str()
    }
}

/// Queue a notice. A session store failure only loses the notice.
pub async fn push(session: &Session, level: FlashLevel, message: impl Into<String>) {
    let mut queued: Vec<Flash> = session
        .get(FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    queued.push(Flash {
        level,
        message: message.into(),
    });

    if let Err(e) = session.insert(FLASH_KEY, queued).await {
        warn!("Failed to store flash notice: {}", e);
    }
}

pub async fn success(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Success, message).await
}

pub async fn error(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Error, message).await
}

pub async fn info(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Info, message).await
}

/// Drain every queued notice.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASH_KEY).await {
        Ok(flashes) => flashes.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to read flash notices: {}", e);
            Vec::new()
        }
    }
}
