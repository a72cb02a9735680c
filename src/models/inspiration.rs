use super::content::{
    require, validate_iso_date, ContentFields, ContentRecord, Direction, FieldValue, ListOrder,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `daily_inspiration`; at most one per date.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Inspiration {
    pub id: i64,
    pub scripture: String,
    pub quote: Option<String>,
    pub author: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspirationFields {
    pub scripture: String,
    pub quote: Option<String>,
    pub author: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspirationForm {
    pub scripture: Option<String>,
    pub quote: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

impl TryFrom<InspirationForm> for InspirationFields {
    type Error = crate::error::AppError;

    fn try_from(form: InspirationForm) -> Result<Self> {
        Ok(InspirationFields {
            scripture: require("scripture", form.scripture)?,
            quote: form.quote,
            author: form.author,
            date: require("date", form.date)?,
        })
    }
}

impl From<&Inspiration> for InspirationForm {
    fn from(i: &Inspiration) -> Self {
        InspirationForm {
            scripture: Some(i.scripture.clone()),
            quote: i.quote.clone(),
            author: i.author.clone(),
            date: Some(i.date.clone()),
            csrf_token: String::new(),
        }
    }
}

impl ContentFields for InspirationFields {
    const COLUMNS: &'static [&'static str] = &["scripture", "quote", "author", "date"];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.scripture.clone()),
            FieldValue::OptionalText(self.quote.clone()),
            FieldValue::OptionalText(self.author.clone()),
            FieldValue::Text(self.date.clone()),
        ]
    }

    fn validate(&self) -> Result<()> {
        validate_iso_date("Date", &self.date)
    }
}

impl ContentRecord for Inspiration {
    type Fields = InspirationFields;

    const TABLE: &'static str = "daily_inspiration";
    const LABEL: &'static str = "Daily inspiration";
    const SORTABLE: &'static [&'static str] = &["id", "date", "author"];
    const DEFAULT_ORDER: ListOrder = ListOrder::new("date", Direction::Desc);
    const DUPLICATE_MESSAGE: &'static str = "A daily inspiration already exists for that date";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Inspiration {
    pub fn quote_text(&self) -> &str {
        self.quote.as_deref().unwrap_or_default()
    }

    pub fn author_text(&self) -> &str {
        self.author.as_deref().unwrap_or_default()
    }
}
