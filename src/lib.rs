pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::{path::Path, sync::Arc};

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use config::{RunMode, SessionLayer};
use handlers::{add_page, add_submit, delete_handler, edit_page, edit_submit, list_page};
use models::{Branch, Event, Inspiration, Sermon};
use repositories::SqliteUserRepository;
use services::{AuthService, ContentService, DashboardService, HomeService};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub sermons: Arc<ContentService<Sermon>>,
    pub events: Arc<ContentService<Event>>,
    pub branches: Arc<ContentService<Branch>>,
    pub inspirations: Arc<ContentService<Inspiration>>,
    pub dashboard_service: Arc<DashboardService>,
    pub home_service: Arc<HomeService>,
}

impl AppState {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        AppState {
            auth_service: Arc::new(AuthService::new(Arc::new(SqliteUserRepository::new(
                pool.clone(),
            )))),
            sermons: Arc::new(ContentService::sqlite(pool.clone())),
            events: Arc::new(ContentService::sqlite(pool.clone())),
            branches: Arc::new(ContentService::sqlite(pool.clone())),
            inspirations: Arc::new(ContentService::sqlite(pool.clone())),
            dashboard_service: Arc::new(DashboardService::new(pool.clone())),
            home_service: Arc::new(HomeService::new(pool)),
        }
    }
}

/// Static assets and uploaded files served alongside the pages.
#[derive(Debug, Clone)]
pub struct AssetDirs<'a> {
    pub static_dir: &'a Path,
    pub uploads_dir: &'a Path,
}

fn admin_content_routes<R: handlers::ManagedContent>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_page::<R>))
        .route("/add", get(add_page::<R>).post(add_submit::<R>))
        .route("/edit/{id}", get(edit_page::<R>).post(edit_submit::<R>))
        .route("/delete/{id}", get(delete_handler::<R>))
}

pub fn build_router(
    state: AppState,
    session_layer: SessionLayer,
    mode: RunMode,
    assets: AssetDirs<'_>,
) -> Router {
    let admin_routes = Router::new()
        .route("/", get(handlers::dashboard_handler))
        .nest("/sermons", admin_content_routes::<Sermon>())
        .nest("/events", admin_content_routes::<Event>())
        .nest("/branches", admin_content_routes::<Branch>())
        .nest("/inspiration", admin_content_routes::<Inspiration>())
        .layer(axum_middleware::from_fn(auth::require_admin));

    Router::new()
        // Public pages
        .route("/", get(handlers::index_handler))
        .route("/sermons", get(handlers::sermons_handler))
        .route("/events", get(handlers::events_handler))
        .route("/branches", get(handlers::branches_handler))
        .route("/inspiration", get(handlers::inspiration_handler))
        // Session lifecycle
        .route(
            "/login",
            get(auth::handlers::login_page).post(auth::handlers::login_handler),
        )
        .route("/logout", get(auth::handlers::logout_handler))
        // Admin
        .nest("/admin", admin_routes)
        // Static files
        .nest_service("/static", ServeDir::new(assets.static_dir))
        .nest_service("/uploads", ServeDir::new(assets.uploads_dir))
        // Layers
        .layer(session_layer)
        .layer(axum_middleware::from_fn_with_state(
            mode,
            middleware::add_security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
