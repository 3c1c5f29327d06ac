use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One trackable work item. Shape is fixed at construction; the only
/// state that ever changes afterwards is the completion flag (and the
/// `updated_at` stamp that records it).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    // Older task files used `task_id` for this key.
    #[serde(alias = "task_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::opt"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Timestamp codec that writes RFC 3339 but also reads the naive
/// offset-less isoformat older task files carry (taken as UTC), so a
/// legacy file does not get discarded as corrupt over its timestamps.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'")))
    }

    pub mod opt {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                None => Ok(None),
                Some(s) => super::parse(&s)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'"))),
            }
        }
    }
}

impl Task {
    /// Builds a task from raw user input. The title is trimmed before the
    /// emptiness check and stored in its trimmed form; the due date must be
    /// a real calendar date in `YYYY-MM-DD` form. Once a task exists its
    /// due date is never re-validated.
    pub fn new(
        id: String,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if NaiveDate::parse_from_str(due_date, DATE_FORMAT).is_err() {
            return Err(ValidationError::InvalidDueDate(due_date.to_string()));
        }

        Ok(Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Marks the task completed. Idempotent; returns whether it was
    /// already completed so callers can tell "already done" apart from
    /// "newly done" when reporting.
    pub fn complete(&mut self) -> bool {
        let was_completed = self.completed;
        self.completed = true;
        self.updated_at = Some(Utc::now());
        was_completed
    }

    /// AND-combination of the two optional search filters: keyword is a
    /// case-insensitive substring match against title or description,
    /// due date is exact string equality. An absent filter matches all.
    pub fn matches(&self, keyword: Option<&str>, due_date: Option<&str>) -> bool {
        if let Some(keyword) = keyword {
            let keyword = keyword.to_lowercase();
            if !self.title.to_lowercase().contains(&keyword)
                && !self.description.to_lowercase().contains(&keyword)
            {
                return false;
            }
        }
        if let Some(due_date) = due_date {
            if self.due_date != due_date {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Pending,
    Completed,
}

impl ListFilter {
    pub fn accepts(&self, task: &Task) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Pending => !task.completed,
            ListFilter::Completed => task.completed,
        }
    }
}

impl std::str::FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ListFilter::All),
            "pending" => Ok(ListFilter::Pending),
            "completed" | "done" => Ok(ListFilter::Completed),
            other => Err(format!(
                "unknown filter '{}' (expected all, pending or completed)",
                other
            )),
        }
    }
}
