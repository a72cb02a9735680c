use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::content_handlers::{FormView, ManagedContent, SortLinks};
use super::page::PageContext;
use crate::error::Result;
use crate::models::{Event, EventFields, EventForm};
use crate::services::ContentService;
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/events.html")]
pub struct AdminEventListTemplate {
    pub page: PageContext,
    pub events: Vec<Event>,
    pub sort: SortLinks,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/event_form.html")]
pub struct EventFormTemplate {
    pub page: PageContext,
    pub form: EventForm,
    pub view: FormView,
    pub csrf_token: String,
}

impl ManagedContent for Event {
    type Form = EventForm;

    const SLUG: &'static str = "events";

    fn service(state: &AppState) -> &ContentService<Self> {
        &state.events
    }

    fn csrf_token(form: &EventForm) -> &str {
        &form.csrf_token
    }

    fn form_from_record(record: &Self) -> EventForm {
        EventForm::from(record)
    }

    fn into_fields(form: EventForm) -> Result<EventFields> {
        EventFields::try_from(form)
    }

    fn list_view(page: PageContext, events: Vec<Self>, sort: SortLinks) -> Response {
        AdminEventListTemplate { page, events, sort }.into_response()
    }

    fn form_view(page: PageContext, form: EventForm, view: FormView, csrf_token: String) -> Response {
        EventFormTemplate {
            page,
            form,
            view,
            csrf_token,
        }
        .into_response()
    }
}
