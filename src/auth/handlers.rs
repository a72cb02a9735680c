use crate::error::{AppError, Result};
use crate::flash;
use crate::handlers::page::PageContext;
use crate::middleware::csrf::{
    get_or_create_csrf_token, validate_csrf_form_field, CSRF_FAILURE_MESSAGE,
};
use crate::services::auth_service::{AuthServiceError, LoginRequest};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

pub async fn login_page(session: Session) -> Result<LoginTemplate> {
    let csrf_token = get_or_create_csrf_token(&session).await?;
    Ok(LoginTemplate {
        page: PageContext::load(&session).await,
        csrf_token,
    })
}

pub async fn login_handler(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if validate_csrf_form_field(&session, &form.csrf_token)
        .await
        .is_err()
    {
        flash::error(&session, CSRF_FAILURE_MESSAGE).await;
        return Ok(Redirect::to("/login").into_response());
    }

    let request = LoginRequest {
        username: form.username.clone(),
        password: form.password,
    };

    match app_state.auth_service.login(request).await {
        Ok(identity) => {
            // Fresh id so a pre-login cookie cannot be reused
            session.cycle_id().await?;
            identity.store(&session).await?;

            info!("User {} logged in", identity.username);
            flash::success(&session, "Login successful!").await;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthServiceError::InvalidCredentials) => {
            warn!("Failed login attempt for {}", form.username);
            flash::error(&session, AppError::InvalidCredentials.to_string()).await;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout_handler(session: Session) -> Result<Redirect> {
    session.flush().await?;
    flash::info(&session, "You have been logged out").await;
    Ok(Redirect::to("/"))
}
