use super::content::{
    checkbox, require, validate_iso_date, ContentFields, ContentRecord, Direction, FieldValue,
    ListOrder,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub registration_required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub registration_required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    /// Present only when the checkbox is ticked.
    pub registration_required: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

impl TryFrom<EventForm> for EventFields {
    type Error = crate::error::AppError;

    fn try_from(form: EventForm) -> Result<Self> {
        Ok(EventFields {
            title: require("title", form.title)?,
            description: form.description,
            date: require("date", form.date)?,
            time: form.time,
            location: form.location,
            registration_required: checkbox(form.registration_required.as_deref()),
        })
    }
}

impl From<&Event> for EventForm {
    fn from(e: &Event) -> Self {
        EventForm {
            title: Some(e.title.clone()),
            description: e.description.clone(),
            date: Some(e.date.clone()),
            time: e.time.clone(),
            location: e.location.clone(),
            registration_required: e.registration_required.then(|| "on".to_string()),
            csrf_token: String::new(),
        }
    }
}

impl ContentFields for EventFields {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "date",
        "time",
        "location",
        "registration_required",
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.title.clone()),
            FieldValue::OptionalText(self.description.clone()),
            FieldValue::Text(self.date.clone()),
            FieldValue::OptionalText(self.time.clone()),
            FieldValue::OptionalText(self.location.clone()),
            FieldValue::Flag(self.registration_required),
        ]
    }

    fn validate(&self) -> Result<()> {
        validate_iso_date("Date", &self.date)
    }
}

impl ContentRecord for Event {
    type Fields = EventFields;

    const TABLE: &'static str = "events";
    const LABEL: &'static str = "Event";
    const SORTABLE: &'static [&'static str] = &["id", "title", "date", "location"];
    const DEFAULT_ORDER: ListOrder = ListOrder::new("date", Direction::Asc);

    fn id(&self) -> i64 {
        self.id
    }
}

impl Event {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn time_text(&self) -> &str {
        self.time.as_deref().unwrap_or_default()
    }

    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}
