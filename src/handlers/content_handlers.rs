//! Admin list/add/edit/delete pages, written once for every content type.
//!
//! Each entity plugs in through [`ManagedContent`]: where its service lives
//! in [`AppState`], how its form converts to fields and which templates
//! render it. Routes are registered with a turbofish, e.g.
//! `get(list_page::<Sermon>)`.

use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{debug, warn};

use super::page::PageContext;
use crate::error::{AppError, Result};
use crate::flash;
use crate::middleware::csrf::{
    get_or_create_csrf_token, validate_csrf_form_field, CSRF_FAILURE_MESSAGE,
};
use crate::models::{ContentRecord, Direction, ListOrder};
use crate::services::ContentService;
use crate::AppState;

pub trait ManagedContent: ContentRecord + Sized {
    type Form: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static;

    /// Path segment under `/admin`.
    const SLUG: &'static str;

    fn service(state: &AppState) -> &ContentService<Self>;
    fn csrf_token(form: &Self::Form) -> &str;
    fn form_from_record(record: &Self) -> Self::Form;
    fn into_fields(form: Self::Form) -> Result<Self::Fields>;

    fn list_view(page: PageContext, items: Vec<Self>, sort: SortLinks) -> Response;
    fn form_view(
        page: PageContext,
        form: Self::Form,
        view: FormView,
        csrf_token: String,
    ) -> Response;
}

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// Column-header links for a list page; clicking the active column flips
/// its direction.
#[derive(Debug, Clone, Copy)]
pub struct SortLinks {
    pub order: ListOrder,
}

impl SortLinks {
    pub fn href(&self, column: &str) -> String {
        let direction = if self.order.column == column {
            match self.order.direction {
                Direction::Asc => Direction::Desc,
                Direction::Desc => Direction::Asc,
            }
        } else {
            Direction::Asc
        };
        format!("?sort={}&dir={}", column, direction)
    }

    pub fn indicator(&self, column: &str) -> &'static str {
        if self.order.column != column {
            ""
        } else if self.order.direction == Direction::Asc {
            " ▲"
        } else {
            " ▼"
        }
    }
}

/// Heading and target of the shared add/edit form.
#[derive(Debug, Clone)]
pub struct FormView {
    pub heading: String,
    pub action: String,
    pub submit_label: &'static str,
}

impl FormView {
    fn add<R: ManagedContent>() -> Self {
        FormView {
            heading: format!("Add {}", R::LABEL),
            action: add_path::<R>(),
            submit_label: "Add",
        }
    }

    fn edit<R: ManagedContent>(id: i64) -> Self {
        FormView {
            heading: format!("Edit {}", R::LABEL),
            action: edit_path::<R>(id),
            submit_label: "Save changes",
        }
    }
}

fn list_path<R: ManagedContent>() -> String {
    format!("/admin/{}", R::SLUG)
}

fn add_path<R: ManagedContent>() -> String {
    format!("/admin/{}/add", R::SLUG)
}

fn edit_path<R: ManagedContent>(id: i64) -> String {
    format!("/admin/{}/edit/{}", R::SLUG, id)
}

fn draft_key(action: &str) -> String {
    format!("_draft:{}", action)
}

/// Keep a rejected submission so the form it redirects back to can show it
/// again. Losing the draft only costs the prefill.
async fn save_draft<F: Serialize>(session: &Session, action: &str, form: &F) {
    if let Err(e) = session.insert(&draft_key(action), form).await {
        warn!("Failed to keep form draft for {}: {}", action, e);
    }
}

async fn take_draft<F: DeserializeOwned>(session: &Session, action: &str) -> Option<F> {
    session.remove::<F>(&draft_key(action)).await.ok().flatten()
}

/// Turn a user-facing error into a notice plus redirect. Missing rows go
/// back to the list, anything else to `back`.
async fn recover<R: ManagedContent>(
    session: &Session,
    err: AppError,
    back: String,
) -> Result<Response> {
    if !err.is_user_facing() {
        return Err(err);
    }

    let target = match err {
        AppError::NotFound(_) => list_path::<R>(),
        _ => back,
    };
    debug!("{} request rejected: {}", R::LABEL, err);
    flash::error(session, err.to_string()).await;
    Ok(Redirect::to(&target).into_response())
}

pub async fn list_page<R: ManagedContent>(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SortQuery>,
) -> Result<Response> {
    let order = match query.sort.as_deref().filter(|s| !s.is_empty()) {
        None => R::DEFAULT_ORDER,
        Some(column) => match ListOrder::parse::<R>(column, query.dir.as_deref()) {
            Ok(order) => order,
            Err(e) => {
                flash::error(&session, e.to_string()).await;
                R::DEFAULT_ORDER
            }
        },
    };

    let items = R::service(&state).list_ordered(order).await?;
    let page = PageContext::load(&session).await;

    Ok(R::list_view(page, items, SortLinks { order }))
}

pub async fn add_page<R: ManagedContent>(session: Session) -> Result<Response> {
    let csrf_token = get_or_create_csrf_token(&session).await?;
    let page = PageContext::load(&session).await;

    let form = take_draft::<R::Form>(&session, &add_path::<R>())
        .await
        .unwrap_or_default();

    Ok(R::form_view(page, form, FormView::add::<R>(), csrf_token))
}

pub async fn add_submit<R: ManagedContent>(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<R::Form>,
) -> Result<Response> {
    if validate_csrf_form_field(&session, R::csrf_token(&form))
        .await
        .is_err()
    {
        flash::error(&session, CSRF_FAILURE_MESSAGE).await;
        return Ok(Redirect::to(&add_path::<R>()).into_response());
    }

    let submitted = form.clone();
    let created = match R::into_fields(form) {
        Ok(fields) => R::service(&state).create(fields).await,
        Err(e) => Err(e),
    };

    match created {
        Ok(_) => {
            flash::success(&session, format!("{} added successfully!", R::LABEL)).await;
            Ok(Redirect::to(&list_path::<R>()).into_response())
        }
        Err(e) => {
            if matches!(e, AppError::Validation(_)) {
                save_draft(&session, &add_path::<R>(), &submitted).await;
            }
            recover::<R>(&session, e, add_path::<R>()).await
        }
    }
}

pub async fn edit_page<R: ManagedContent>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Response> {
    let record = match R::service(&state).get(id).await {
        Ok(record) => record,
        Err(e) => return recover::<R>(&session, e, list_path::<R>()).await,
    };

    let csrf_token = get_or_create_csrf_token(&session).await?;
    let page = PageContext::load(&session).await;

    let form = match take_draft::<R::Form>(&session, &edit_path::<R>(id)).await {
        Some(draft) => draft,
        None => R::form_from_record(&record),
    };

    Ok(R::form_view(page, form, FormView::edit::<R>(id), csrf_token))
}

pub async fn edit_submit<R: ManagedContent>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<R::Form>,
) -> Result<Response> {
    if validate_csrf_form_field(&session, R::csrf_token(&form))
        .await
        .is_err()
    {
        flash::error(&session, CSRF_FAILURE_MESSAGE).await;
        return Ok(Redirect::to(&edit_path::<R>(id)).into_response());
    }

    let submitted = form.clone();
    let updated = match R::into_fields(form) {
        Ok(fields) => R::service(&state).update(id, fields).await,
        Err(e) => Err(e),
    };

    match updated {
        Ok(()) => {
            flash::success(&session, format!("{} updated successfully!", R::LABEL)).await;
            Ok(Redirect::to(&list_path::<R>()).into_response())
        }
        Err(e) => {
            if matches!(e, AppError::Validation(_)) {
                save_draft(&session, &edit_path::<R>(id), &submitted).await;
            }
            recover::<R>(&session, e, edit_path::<R>(id)).await
        }
    }
}

pub async fn delete_handler<R: ManagedContent>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    R::service(&state).delete(id).await?;
    flash::success(&session, format!("{} deleted successfully!", R::LABEL)).await;
    Ok(Redirect::to(&list_path::<R>()))
}
