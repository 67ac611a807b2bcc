//! Trip planner reminder and event models.
//!
//! # Invariants
//! - `TripReminder::text` and `TripEvent::title` are trimmed and non-blank.
//! - `TripEvent::date` is always a zero-padded `YYYY-MM-DD` date key.
//! - `TripReminder::due_date`, when set, is a zero-padded date key.

use super::now_epoch_ms;
use super::validation::{
    canonical_date_key, optional_text, require_date_key, require_text, ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ReminderId = Uuid;
pub type EventId = Uuid;

/// Checklist entry with an optional due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripReminder {
    pub id: ReminderId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub completed: bool,
    pub created_at: i64,
}

impl TripReminder {
    /// Builds an open reminder from validated input.
    pub fn create(input: NewTripReminder) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: input.text,
            due_date: input.due_date,
            completed: false,
            created_at: now_epoch_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::BlankText("text"));
        }
        if let Some(due_date) = &self.due_date {
            if !is_canonical(due_date) {
                return Err(ValidationError::InvalidDateKey {
                    field: "dueDate",
                    value: due_date.clone(),
                });
            }
        }
        Ok(())
    }

    /// Rewrites a parseable `due_date` into canonical form, then validates.
    pub(crate) fn normalized(mut self) -> Result<Self, ValidationError> {
        if let Some(key) = self.due_date.as_deref().and_then(canonical_date_key) {
            self.due_date = Some(key);
        }
        self.validate()?;
        Ok(self)
    }
}

/// Dated calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEvent {
    pub id: EventId,
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
}

impl TripEvent {
    pub fn create(input: NewTripEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            date: input.date,
            note: input.note,
            created_at: now_epoch_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankText("title"));
        }
        if !is_canonical(&self.date) {
            return Err(ValidationError::InvalidDateKey {
                field: "date",
                value: self.date.clone(),
            });
        }
        Ok(())
    }

    /// Rewrites a parseable `date` into canonical form, then validates.
    pub(crate) fn normalized(mut self) -> Result<Self, ValidationError> {
        if let Some(key) = canonical_date_key(&self.date) {
            self.date = key;
        }
        self.validate()?;
        Ok(self)
    }
}

fn is_canonical(value: &str) -> bool {
    canonical_date_key(value).as_deref() == Some(value)
}

/// Validated input for `TripPlannerStore::add_reminder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTripReminder {
    text: String,
    due_date: Option<String>,
}

impl NewTripReminder {
    /// Blank `due_date` is treated as absent.
    pub fn new(text: &str, due_date: Option<&str>) -> Result<Self, ValidationError> {
        let text = require_text("text", text)?;
        let due_date = match optional_text(due_date) {
            Some(value) => Some(require_date_key("dueDate", &value)?),
            None => None,
        };
        Ok(Self { text, due_date })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }
}

/// Validated input for `TripPlannerStore::add_event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTripEvent {
    title: String,
    date: String,
    note: Option<String>,
}

impl NewTripEvent {
    /// Blank `note` is treated as absent.
    pub fn new(title: &str, date: &str, note: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_text("title", title)?,
            date: require_date_key("date", date)?,
            note: optional_text(note),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTripEvent, NewTripReminder, TripEvent, TripReminder};
    use crate::model::validation::ValidationError;

    #[test]
    fn reminder_input_trims_text_and_treats_blank_due_date_as_absent() {
        let input = NewTripReminder::new("  Renew passport ", Some("  ")).unwrap();
        assert_eq!(input.text(), "Renew passport");
        assert_eq!(input.due_date(), None);
    }

    #[test]
    fn reminder_input_rejects_malformed_due_date() {
        let err = NewTripReminder::new("Pack", Some("next friday")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateKey { field: "dueDate", .. }));
    }

    #[test]
    fn event_input_requires_title_and_date() {
        assert_eq!(
            NewTripEvent::new("   ", "2024-03-05", None),
            Err(ValidationError::BlankText("title"))
        );
        assert_eq!(
            NewTripEvent::new("Flight", "", None),
            Err(ValidationError::BlankText("date"))
        );
    }

    #[test]
    fn created_reminder_starts_open() {
        let reminder = TripReminder::create(NewTripReminder::new("Water plants", None).unwrap());
        assert!(!reminder.completed);
        assert!(reminder.validate().is_ok());
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let event = TripEvent::create(NewTripEvent::new("Check-in", "2024-03-05", Some(" ")).unwrap());
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("note").is_none());
        assert_eq!(json["date"], "2024-03-05");
    }

    #[test]
    fn unpadded_dates_are_stored_zero_padded() {
        let event = TripEvent::create(NewTripEvent::new("Flight", "2024-3-5", None).unwrap());
        assert_eq!(event.date, "2024-03-05");

        let reminder =
            TripReminder::create(NewTripReminder::new("Pack", Some(" 2024-3-4 ")).unwrap());
        assert_eq!(reminder.due_date.as_deref(), Some("2024-03-04"));
    }

    #[test]
    fn validate_requires_padded_keys_and_normalized_repairs_them() {
        let mut event = TripEvent::create(NewTripEvent::new("Flight", "2024-03-05", None).unwrap());
        event.date = "2024-3-5".to_string();
        assert!(event.validate().is_err());

        let repaired = event.normalized().unwrap();
        assert_eq!(repaired.date, "2024-03-05");

        let mut broken = repaired.clone();
        broken.date = "2024-02-30".to_string();
        assert!(broken.normalized().is_err());
    }
}
