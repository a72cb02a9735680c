use super::content::{require, ContentFields, ContentRecord, Direction, FieldValue, ListOrder};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service_times: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchFields {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service_times: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service_times: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

impl TryFrom<BranchForm> for BranchFields {
    type Error = crate::error::AppError;

    fn try_from(form: BranchForm) -> Result<Self> {
        Ok(BranchFields {
            name: require("name", form.name)?,
            address: require("address", form.address)?,
            phone: form.phone,
            email: form.email,
            service_times: form.service_times,
        })
    }
}

impl From<&Branch> for BranchForm {
    fn from(b: &Branch) -> Self {
        BranchForm {
            name: Some(b.name.clone()),
            address: Some(b.address.clone()),
            phone: b.phone.clone(),
            email: b.email.clone(),
            service_times: b.service_times.clone(),
            csrf_token: String::new(),
        }
    }
}

impl ContentFields for BranchFields {
    const COLUMNS: &'static [&'static str] =
        &["name", "address", "phone", "email", "service_times"];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.name.clone()),
            FieldValue::Text(self.address.clone()),
            FieldValue::OptionalText(self.phone.clone()),
            FieldValue::OptionalText(self.email.clone()),
            FieldValue::OptionalText(self.service_times.clone()),
        ]
    }
}

impl ContentRecord for Branch {
    type Fields = BranchFields;

    const TABLE: &'static str = "branches";
    const LABEL: &'static str = "Branch";
    const SORTABLE: &'static [&'static str] = &["id", "name", "address"];
    // Branches have no natural order; insertion order it is.
    const DEFAULT_ORDER: ListOrder = ListOrder::new("id", Direction::Asc);

    fn id(&self) -> i64 {
        self.id
    }
}

impl Branch {
    pub fn phone_text(&self) -> &str {
        self.phone.as_deref().unwrap_or_default()
    }

    pub fn email_text(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn service_times_text(&self) -> &str {
        self.service_times.as_deref().unwrap_or_default()
    }
}
