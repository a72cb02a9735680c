use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::content_handlers::{FormView, ManagedContent, SortLinks};
use super::page::PageContext;
use crate::error::Result;
use crate::models::{Branch, BranchFields, BranchForm};
use crate::services::ContentService;
use crate::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/branches.html")]
pub struct AdminBranchListTemplate {
    pub page: PageContext,
    pub branches: Vec<Branch>,
    pub sort: SortLinks,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/branch_form.html")]
pub struct BranchFormTemplate {
    pub page: PageContext,
    pub form: BranchForm,
    pub view: FormView,
    pub csrf_token: String,
}

impl ManagedContent for Branch {
    type Form = BranchForm;

    const SLUG: &'static str = "branches";

    fn service(state: &AppState) -> &ContentService<Self> {
        &state.branches
    }

    fn csrf_token(form: &BranchForm) -> &str {
        &form.csrf_token
    }

    fn form_from_record(record: &Self) -> BranchForm {
        BranchForm::from(record)
    }

    fn into_fields(form: BranchForm) -> Result<BranchFields> {
        BranchFields::try_from(form)
    }

    fn list_view(page: PageContext, branches: Vec<Self>, sort: SortLinks) -> Response {
        AdminBranchListTemplate { page, branches, sort }.into_response()
    }

    fn form_view(page: PageContext, form: BranchForm, view: FormView, csrf_token: String) -> Response {
        BranchFormTemplate {
            page,
            form,
            view,
            csrf_token,
        }
        .into_response()
    }
}
