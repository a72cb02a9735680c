use crate::error::Result;
use crate::models::{Event, Inspiration, Sermon};
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub const HOME_LIST_LIMIT: i64 = 3;

/// Everything the home page binds.
#[derive(Debug, Default, Clone)]
pub struct HomePage {
    pub upcoming_events: Vec<Event>,
    pub today_inspiration: Option<Inspiration>,
    pub recent_sermons: Vec<Sermon>,
}

/// Read-only queries behind `/`. Dates are ISO strings, so comparing and
/// ordering them as text is chronological.
#[derive(Clone, Debug)]
pub struct HomeService {
    pool: SqlitePool,
}

impl HomeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn home_page(&self, today: NaiveDate) -> Result<HomePage> {
        Ok(HomePage {
            upcoming_events: self.upcoming_events(today, HOME_LIST_LIMIT).await?,
            today_inspiration: self.inspiration_for(today).await?,
            recent_sermons: self.recent_sermons(HOME_LIST_LIMIT).await?,
        })
    }

    /// Events on or after `today`, soonest first. `time` is free text, so
    /// same-day events keep insertion order.
    pub async fn upcoming_events(&self, today: NaiveDate, limit: i64) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, date, time, location, registration_required
            FROM events
            WHERE date >= ?
            ORDER BY date ASC, id ASC
            LIMIT ?
            "#,
        )
        .bind(iso(today))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn inspiration_for(&self, day: NaiveDate) -> Result<Option<Inspiration>> {
        let inspiration = sqlx::query_as::<_, Inspiration>(
            "SELECT id, scripture, quote, author, date FROM daily_inspiration WHERE date = ?",
        )
        .bind(iso(day))
        .fetch_optional(&self.pool)
        .await?;

        Ok(inspiration)
    }

    pub async fn recent_sermons(&self, limit: i64) -> Result<Vec<Sermon>> {
        let sermons = sqlx::query_as::<_, Sermon>(
            r#"
            SELECT id, title, speaker, date, scripture, description
            FROM sermons
            ORDER BY date DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sermons)
    }
}

fn iso(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
