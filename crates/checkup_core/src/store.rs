use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::{
    notify::{NotificationRequest, NotificationSink},
    query::ReminderView,
    recurrence,
    reminder::{Reminder, ReminderDraft, ReminderId, ReminderPatch},
    validation::{self, ValidationError},
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no reminder with id {0}")]
    NotFound(ReminderId),
}

/// In-memory collection of reminders keyed by id. The store never reads a
/// clock; every operation that derives a status takes `today` from the caller.
pub struct ReminderStore {
    records: RwLock<BTreeMap<ReminderId, Reminder>>,
    next_id: AtomicU64,
    notification_sink: Option<Box<dyn NotificationSink>>,
}

pub struct ReminderStoreBuilder {
    seeds: Vec<ReminderDraft>,
    notification_sink: Option<Box<dyn NotificationSink>>,
}

impl ReminderStoreBuilder {
    pub fn new() -> Self {
        Self {
            seeds: Vec::new(),
            notification_sink: None,
        }
    }

    pub fn add_reminder(mut self, draft: ReminderDraft) -> Self {
        self.seeds.push(draft);
        self
    }

    pub fn with_notification_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.notification_sink = Some(sink);
        self
    }

    pub fn build(self, today: NaiveDate) -> Result<ReminderStore, StoreError> {
        let mut store = ReminderStore::new();
        store.notification_sink = self.notification_sink;
        for draft in self.seeds {
            store.create(&draft, today)?;
        }
        Ok(store)
    }
}

impl ReminderStore {
    pub fn builder() -> ReminderStoreBuilder {
        ReminderStoreBuilder::new()
    }

    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            notification_sink: None,
        }
    }

    pub fn create(
        &self,
        draft: &ReminderDraft,
        today: NaiveDate,
    ) -> Result<ReminderView, StoreError> {
        let new = validation::validate(draft)?;
        let id = ReminderId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let reminder = new.into_reminder(id);
        self.records.write().insert(id, reminder.clone());
        debug!(id = %id, due = %reminder.due_date, "reminder created");
        self.schedule_notification(&reminder);
        Ok(ReminderView::from_reminder(reminder, today))
    }

    /// One-off reminders move to their terminal completed state and repeat
    /// calls are no-ops; recurring reminders advance one interval instead.
    pub fn mark_complete(
        &self,
        id: ReminderId,
        today: NaiveDate,
    ) -> Result<ReminderView, StoreError> {
        let mut records = self.records.write();
        let reminder = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        match reminder.recurrence {
            Some(recurrence) => {
                let next_due = recurrence::advance(reminder.due_date, recurrence);
                debug!(id = %id, from = %reminder.due_date, to = %next_due, "recurring reminder advanced");
                reminder.due_date = next_due;
                self.schedule_notification(reminder);
            }
            None => {
                if !reminder.completed {
                    reminder.completed = true;
                    debug!(id = %id, "reminder completed");
                    self.clear_notification(id);
                }
            }
        }
        Ok(ReminderView::from_reminder(reminder.clone(), today))
    }

    pub fn delete(&self, id: ReminderId) -> Result<(), StoreError> {
        let removed = self.records.write().remove(&id);
        match removed {
            Some(_) => {
                debug!(id = %id, "reminder deleted");
                self.clear_notification(id);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    pub fn edit(
        &self,
        id: ReminderId,
        patch: &ReminderPatch,
        today: NaiveDate,
    ) -> Result<ReminderView, StoreError> {
        let mut records = self.records.write();
        let reminder = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        // Stage every merged value before writing any of them.
        let provider = match &patch.provider {
            Some(raw) => validation::parse_provider(raw)?,
            None => reminder.provider.clone(),
        };
        let notes = match &patch.notes {
            Some(raw) => validation::normalize_notes(raw),
            None => reminder.notes.clone(),
        };
        let lead_days = match patch.lead_days {
            Some(raw) => validation::parse_lead_days(raw)?,
            None => reminder.lead_days,
        };
        let notification_channel = match &patch.notification_channel {
            Some(raw) => validation::parse_channel(raw)?,
            None => reminder.notification_channel,
        };

        let reschedule = lead_days != reminder.lead_days
            || notification_channel != reminder.notification_channel;

        reminder.provider = provider;
        reminder.notes = notes;
        reminder.lead_days = lead_days;
        reminder.notification_channel = notification_channel;
        debug!(id = %id, "reminder edited");

        if reschedule && !reminder.completed {
            self.schedule_notification(reminder);
        }
        Ok(ReminderView::from_reminder(reminder.clone(), today))
    }

    pub fn get(&self, id: ReminderId, today: NaiveDate) -> Result<ReminderView, StoreError> {
        let records = self.records.read();
        let reminder = records.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(ReminderView::from_reminder(reminder.clone(), today))
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub(crate) fn cloned_records(&self) -> Vec<Reminder> {
        self.records.read().values().cloned().collect()
    }

    fn schedule_notification(&self, reminder: &Reminder) {
        if let Some(sink) = &self.notification_sink {
            sink.schedule(NotificationRequest::for_reminder(reminder));
        }
    }

    fn clear_notification(&self, id: ReminderId) {
        if let Some(sink) = &self.notification_sink {
            sink.clear(id);
        }
    }
}

impl Default for ReminderStore {
    fn default() -> Self {
        Self::new()
    }
}
