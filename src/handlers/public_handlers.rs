use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;

use super::page::PageContext;
use crate::error::Result;
use crate::models::{Branch, Event, Inspiration, Sermon};
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageContext,
    pub upcoming_events: Vec<Event>,
    pub today_inspiration: Option<Inspiration>,
    pub recent_sermons: Vec<Sermon>,
}

#[derive(Template, WebTemplate)]
#[template(path = "sermons.html")]
pub struct SermonsTemplate {
    pub page: PageContext,
    pub sermons: Vec<Sermon>,
}

#[derive(Template, WebTemplate)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub page: PageContext,
    pub events: Vec<Event>,
}

#[derive(Template, WebTemplate)]
#[template(path = "branches.html")]
pub struct BranchesTemplate {
    pub page: PageContext,
    pub branches: Vec<Branch>,
}

#[derive(Template, WebTemplate)]
#[template(path = "inspiration.html")]
pub struct InspirationTemplate {
    pub page: PageContext,
    pub inspirations: Vec<Inspiration>,
}

pub async fn index_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<IndexTemplate> {
    let today = chrono::Utc::now().date_naive();
    let home = state.home_service.home_page(today).await?;

    Ok(IndexTemplate {
        page: PageContext::load(&session).await,
        upcoming_events: home.upcoming_events,
        today_inspiration: home.today_inspiration,
        recent_sermons: home.recent_sermons,
    })
}

pub async fn sermons_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<SermonsTemplate> {
    Ok(SermonsTemplate {
        sermons: state.sermons.list().await?,
        page: PageContext::load(&session).await,
    })
}

pub async fn events_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<EventsTemplate> {
    Ok(EventsTemplate {
        events: state.events.list().await?,
        page: PageContext::load(&session).await,
    })
}

pub async fn branches_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<BranchesTemplate> {
    Ok(BranchesTemplate {
        branches: state.branches.list().await?,
        page: PageContext::load(&session).await,
    })
}

pub async fn inspiration_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<InspirationTemplate> {
    Ok(InspirationTemplate {
        inspirations: state.inspirations.list().await?,
        page: PageContext::load(&session).await,
    })
}
