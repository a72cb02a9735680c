use super::content::{
    require, validate_iso_date, ContentFields, ContentRecord, Direction, FieldValue, ListOrder,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Sermon {
    pub id: i64,
    pub title: String,
    pub speaker: String,
    pub date: String,
    pub scripture: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SermonFields {
    pub title: String,
    pub speaker: String,
    pub date: String,
    pub scripture: Option<String>,
    pub description: Option<String>,
}

/// Admin add/edit form as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SermonForm {
    pub title: Option<String>,
    pub speaker: Option<String>,
    pub date: Option<String>,
    pub scripture: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

impl TryFrom<SermonForm> for SermonFields {
    type Error = crate::error::AppError;

    fn try_from(form: SermonForm) -> Result<Self> {
        Ok(SermonFields {
            title: require("title", form.title)?,
            speaker: require("speaker", form.speaker)?,
            date: require("date", form.date)?,
            scripture: form.scripture,
            description: form.description,
        })
    }
}

impl From<&Sermon> for SermonForm {
    fn from(s: &Sermon) -> Self {
        SermonForm {
            title: Some(s.title.clone()),
            speaker: Some(s.speaker.clone()),
            date: Some(s.date.clone()),
            scripture: s.scripture.clone(),
            description: s.description.clone(),
            csrf_token: String::new(),
        }
    }
}

impl ContentFields for SermonFields {
    const COLUMNS: &'static [&'static str] =
        &["title", "speaker", "date", "scripture", "description"];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.title.clone()),
            FieldValue::Text(self.speaker.clone()),
            FieldValue::Text(self.date.clone()),
            FieldValue::OptionalText(self.scripture.clone()),
            FieldValue::OptionalText(self.description.clone()),
        ]
    }

    fn validate(&self) -> Result<()> {
        validate_iso_date("Date", &self.date)
    }
}

impl ContentRecord for Sermon {
    type Fields = SermonFields;

    const TABLE: &'static str = "sermons";
    const LABEL: &'static str = "Sermon";
    const SORTABLE: &'static [&'static str] = &["id", "title", "speaker", "date"];
    const DEFAULT_ORDER: ListOrder = ListOrder::new("date", Direction::Desc);

    fn id(&self) -> i64 {
        self.id
    }
}

impl Sermon {
    pub fn scripture_text(&self) -> &str {
        self.scripture.as_deref().unwrap_or_default()
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn missing_speaker_is_a_validation_error() {
        let form = SermonForm {
            title: Some("X".into()),
            date: Some("2025-01-01".into()),
            ..Default::default()
        };
        let err = SermonFields::try_from(form).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("speaker")));
    }

    #[test]
    fn optional_fields_pass_through_unchanged() {
        let form = SermonForm {
            title: Some("X".into()),
            speaker: Some("Y".into()),
            date: Some("2025-01-01".into()),
            scripture: Some(String::new()),
            description: None,
            csrf_token: String::new(),
        };
        let fields = SermonFields::try_from(form).unwrap();
        assert_eq!(fields.scripture.as_deref(), Some(""));
        assert_eq!(fields.description, None);
        assert_eq!(fields.values().len(), SermonFields::COLUMNS.len());
    }
}
