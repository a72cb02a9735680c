use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::content_handlers::{FormView, ManagedContent, SortLinks};
use super::page::PageContext;
use crate::error::Result;
use crate::models::{Inspiration, InspirationFields, InspirationForm};
use crate::services::ContentService;
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/inspiration.html")]
pub struct AdminInspirationListTemplate {
    pub page: PageContext,
    pub inspirations: Vec<Inspiration>,
    pub sort: SortLinks,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/inspiration_form.html")]
pub struct InspirationFormTemplate {
    pub page: PageContext,
    pub form: InspirationForm,
    pub view: FormView,
    pub csrf_token: String,
}

impl ManagedContent for Inspiration {
    type Form = InspirationForm;

    const SLUG: &'static str = "inspiration";

    fn service(state: &AppState) -> &ContentService<Self> {
        &state.inspirations
    }

    fn csrf_token(form: &InspirationForm) -> &str {
        &form.csrf_token
    }

    fn form_from_record(record: &Self) -> InspirationForm {
        InspirationForm::from(record)
    }

    fn into_fields(form: InspirationForm) -> Result<InspirationFields> {
        InspirationFields::try_from(form)
    }

    fn list_view(page: PageContext, inspirations: Vec<Self>, sort: SortLinks) -> Response {
        AdminInspirationListTemplate { page, inspirations, sort }.into_response()
    }

    fn form_view(page: PageContext, form: InspirationForm, view: FormView, csrf_token: String) -> Response {
        InspirationFormTemplate {
            page,
            form,
            view,
            csrf_token,
        }
        .into_response()
    }
}
