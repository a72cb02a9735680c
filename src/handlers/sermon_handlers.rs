use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::content_handlers::{FormView, ManagedContent, SortLinks};
use super::page::PageContext;
use crate::error::Result;
use crate::models::{Sermon, SermonFields, SermonForm};
use crate::services::ContentService;
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/sermons.html")]
pub struct AdminSermonListTemplate {
    pub page: PageContext,
    pub sermons: Vec<Sermon>,
    pub sort: SortLinks,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/sermon_form.html")]
pub struct SermonFormTemplate {
    pub page: PageContext,
    pub form: SermonForm,
    pub view: FormView,
    pub csrf_token: String,
}

impl ManagedContent for Sermon {
    type Form = SermonForm;

    const SLUG: &'static str = "sermons";

    fn service(state: &AppState) -> &ContentService<Self> {
        &state.sermons
    }

    fn csrf_token(form: &SermonForm) -> &str {
        &form.csrf_token
    }

    fn form_from_record(record: &Self) -> SermonForm {
        SermonForm::from(record)
    }

    fn into_fields(form: SermonForm) -> Result<SermonFields> {
        SermonFields::try_from(form)
    }

    fn list_view(page: PageContext, sermons: Vec<Self>, sort: SortLinks) -> Response {
        AdminSermonListTemplate { page, sermons, sort }.into_response()
    }

    fn form_view(page: PageContext, form: SermonForm, view: FormView, csrf_token: String) -> Response {
        SermonFormTemplate {
            page,
            form,
            view,
            csrf_token,
        }
        .into_response()
    }
}
