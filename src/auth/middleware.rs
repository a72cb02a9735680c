use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::warn;

use super::identity::SessionIdentity;
use crate::{error::AppError, flash};

/// Gate for every `/admin` route. Anything short of an admin session is
/// sent to the login page before the handler runs; otherwise the identity
/// is handed to the handler as an extension.
pub async fn require_admin(session: Session, mut request: Request, next: Next) -> Response {
    match SessionIdentity::load(&session).await {
        Some(identity) if identity.is_admin() => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        other => {
            warn!(
                "Rejected {} {} for {}",
                request.method(),
                request.uri().path(),
                other
                    .as_ref()
                    .map(|i| i.username.as_str())
                    .unwrap_or("anonymous")
            );
            flash::error(&session, AppError::AdminAccessRequired.to_string()).await;
            Redirect::to("/login").into_response()
        }
    }
}
