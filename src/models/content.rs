//! Shared contract for the four content tables.
//!
//! Every content entity (sermons, events, branches, daily inspiration) is a
//! typed record read with `FromRow` plus a *fields* struct holding all of
//! its mutable columns. The generic repository builds its SQL from the
//! constants declared here, so adding a column means touching the model
//! only.

use crate::error::{AppError, Result};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use std::fmt;

/// A value bound to one mutable column on insert/update.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    OptionalText(Option<String>),
    Flag(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(AppError::Validation(format!(
                "Unknown sort direction: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        })
    }
}

/// Ordering for `list`. The column is always one of the record's
/// `SORTABLE` names, never caller-supplied text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOrder {
    pub column: &'static str,
    pub direction: Direction,
}

impl ListOrder {
    pub const fn new(column: &'static str, direction: Direction) -> Self {
        Self { column, direction }
    }

    /// Resolve a `?sort=..&dir=..` pair against the record's whitelist.
    /// A missing direction keeps the record's default direction.
    pub fn parse<R: ContentRecord>(column: &str, direction: Option<&str>) -> Result<Self> {
        let column = R::SORTABLE
            .iter()
            .copied()
            .find(|c| *c == column)
            .ok_or_else(|| AppError::Validation(format!("Cannot sort by: {}", column)))?;

        let direction = match direction {
            Some(dir) if !dir.is_empty() => Direction::parse(dir)?,
            _ => R::DEFAULT_ORDER.direction,
        };

        Ok(Self { column, direction })
    }

    /// `ORDER BY` clause body; ties fall back to insertion order in the same
    /// direction so listings are stable.
    pub fn to_sql(self) -> String {
        if self.column == "id" {
            format!("id {}", self.direction.as_sql())
        } else {
            format!(
                "{} {}, id {}",
                self.column,
                self.direction.as_sql(),
                self.direction.as_sql()
            )
        }
    }
}

pub trait ContentFields: Send + Sync + 'static {
    /// Mutable columns in bind order.
    const COLUMNS: &'static [&'static str];

    /// Values for `COLUMNS`, same order.
    fn values(&self) -> Vec<FieldValue>;

    /// Checks beyond field presence, which the form conversion enforces.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

pub trait ContentRecord: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    type Fields: ContentFields;

    const TABLE: &'static str;
    /// Human-readable name used in notices ("Sermon not found").
    const LABEL: &'static str;
    const SORTABLE: &'static [&'static str];
    const DEFAULT_ORDER: ListOrder;
    /// Notice shown when an insert/update hits a unique index.
    const DUPLICATE_MESSAGE: &'static str = "A matching entry already exists";

    fn id(&self) -> i64;
}

/// Unwrap a submitted form field, failing with a validation error when the
/// field was not submitted at all. Empty strings are accepted.
pub fn require(field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| AppError::missing_field(field))
}

/// Non-empty dates must be ISO `YYYY-MM-DD`; listings and the home page
/// compare them as strings.
pub fn validate_iso_date(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    // chrono tolerates unpadded fields and signs; only the canonical
    // spelling sorts correctly as text
    let canonical = value.len() == 10
        && NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string() == value)
            .unwrap_or(false);

    if canonical {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} must be a date (YYYY-MM-DD)",
            field
        )))
    }
}

/// Checkbox semantics: any submitted value means checked.
pub fn checkbox(value: Option<&str>) -> bool {
    value.is_some()
}
