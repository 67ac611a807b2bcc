//! Trip planner store for reminders and calendar events.
//!
//! # Responsibility
//! - Own reminders and events for one session.
//! - Persist both collections as one combined snapshot after every mutation.
//!
//! # Invariants
//! - New entries are prepended; toggling keeps order.
//! - Every mutation writes reminders and events together.

use crate::model::planner::{
    EventId, NewTripEvent, NewTripReminder, ReminderId, TripEvent, TripReminder,
};
use crate::repo::kv_repo::KeyValueSurface;
use crate::repo::snapshot::{
    decode_each, keep_first_by, load_snapshot, save_snapshot, PersistOutcome,
};
use crate::service::StoreWrite;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Storage record key for the combined planner snapshot.
pub const TRIP_PLANNER_KEY: &str = "trip-test:trip-planner";

/// Persisted planner document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    pub reminders: Vec<TripReminder>,
    pub events: Vec<TripEvent>,
}

/// Session-scoped reminders and events store.
pub struct TripPlannerStore<S: KeyValueSurface> {
    surface: S,
    state: PlannerSnapshot,
    last_persist: Option<PersistOutcome>,
}

impl<S: KeyValueSurface> TripPlannerStore<S> {
    pub fn open(surface: S) -> Self {
        let state: PlannerSnapshot = load_snapshot(&surface, TRIP_PLANNER_KEY, decode_snapshot);
        info!(
            "event=store_open module=planner status=ok reminders={} events={}",
            state.reminders.len(),
            state.events.len()
        );
        Self {
            surface,
            state,
            last_persist: None,
        }
    }

    pub fn reminders(&self) -> &[TripReminder] {
        &self.state.reminders
    }

    pub fn events(&self) -> &[TripEvent] {
        &self.state.events
    }

    pub fn snapshot(&self) -> &PlannerSnapshot {
        &self.state
    }

    pub fn last_persist(&self) -> Option<&PersistOutcome> {
        self.last_persist.as_ref()
    }

    pub fn add_reminder(&mut self, input: NewTripReminder) -> StoreWrite<TripReminder> {
        let reminder = TripReminder::create(input);
        self.state.reminders.insert(0, reminder.clone());
        debug!(
            "event=reminder_add module=planner status=ok has_due_date={}",
            reminder.due_date.is_some()
        );
        let persist = self.persist();
        StoreWrite::new(reminder, persist)
    }

    /// Flips `completed` on `id`. Returns the new state, `None` if absent.
    pub fn toggle_reminder(&mut self, id: ReminderId) -> StoreWrite<Option<bool>> {
        let completed = self
            .state
            .reminders
            .iter_mut()
            .find(|reminder| reminder.id == id)
            .map(|reminder| {
                reminder.completed = !reminder.completed;
                reminder.completed
            });
        debug!(
            "event=reminder_toggle module=planner status=ok matched={}",
            completed.is_some()
        );
        let persist = self.persist();
        StoreWrite::new(completed, persist)
    }

    /// Removes `id`. Returns whether something was removed.
    pub fn remove_reminder(&mut self, id: ReminderId) -> StoreWrite<bool> {
        let before = self.state.reminders.len();
        self.state.reminders.retain(|reminder| reminder.id != id);
        let removed = self.state.reminders.len() != before;
        debug!("event=reminder_remove module=planner status=ok removed={removed}");
        let persist = self.persist();
        StoreWrite::new(removed, persist)
    }

    pub fn add_event(&mut self, input: NewTripEvent) -> StoreWrite<TripEvent> {
        let event = TripEvent::create(input);
        self.state.events.insert(0, event.clone());
        debug!("event=event_add module=planner status=ok has_note={}", event.note.is_some());
        let persist = self.persist();
        StoreWrite::new(event, persist)
    }

    pub fn remove_event(&mut self, id: EventId) -> StoreWrite<bool> {
        let before = self.state.events.len();
        self.state.events.retain(|event| event.id != id);
        let removed = self.state.events.len() != before;
        debug!("event=event_remove module=planner status=ok removed={removed}");
        let persist = self.persist();
        StoreWrite::new(removed, persist)
    }

    /// Clears both collections and persists the empty pair.
    pub fn reset(&mut self) -> StoreWrite<()> {
        self.state = PlannerSnapshot::default();
        info!("event=store_reset module=planner status=ok");
        let persist = self.persist();
        StoreWrite::new((), persist)
    }

    /// Events on one date key, in store order.
    pub fn events_on(&self, date_key: &str) -> Vec<&TripEvent> {
        self.state
            .events
            .iter()
            .filter(|event| event.date == date_key)
            .collect()
    }

    /// Number of events per date key, for calendar badges.
    pub fn events_by_date(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.state.events {
            *counts.entry(event.date.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn persist(&mut self) -> PersistOutcome {
        let outcome = save_snapshot(&self.surface, TRIP_PLANNER_KEY, &self.state);
        self.last_persist = Some(outcome.clone());
        outcome
    }
}

fn decode_snapshot(value: Value) -> Option<PlannerSnapshot> {
    let Value::Object(mut fields) = value else {
        return None;
    };
    let reminders = fields
        .remove("reminders")
        .and_then(|raw| {
            decode_each(raw, |element| {
                serde_json::from_value::<TripReminder>(element)
                    .ok()
                    .and_then(|reminder| reminder.normalized().ok())
            })
        })
        .map(|reminders| keep_first_by(reminders, |reminder| reminder.id))
        .unwrap_or_default();
    let events = fields
        .remove("events")
        .and_then(|raw| {
            decode_each(raw, |element| {
                serde_json::from_value::<TripEvent>(element)
                    .ok()
                    .and_then(|event| event.normalized().ok())
            })
        })
        .map(|events| keep_first_by(events, |event| event.id))
        .unwrap_or_default();
    Some(PlannerSnapshot { reminders, events })
}
