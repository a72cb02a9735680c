use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Extension, State};
use tower_sessions::Session;

use super::page::PageContext;
use crate::auth::SessionIdentity;
use crate::error::Result;
use crate::services::DashboardStats;
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub page: PageContext,
    pub stats: DashboardStats,
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    session: Session,
) -> Result<DashboardTemplate> {
    tracing::debug!("Dashboard requested by {}", identity.username);
    let stats = state.dashboard_service.get_dashboard_stats().await?;

    Ok(DashboardTemplate {
        page: PageContext::load(&session).await,
        stats,
    })
}
