use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reminder::{NotificationChannel, Reminder, ReminderId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub reminder_id: ReminderId,
    pub title: String,
    pub body: String,
    pub notification_channel: NotificationChannel,
    pub notify_on: NaiveDate,
}

impl NotificationRequest {
    pub fn for_reminder(reminder: &Reminder) -> Self {
        Self {
            reminder_id: reminder.id,
            title: format!("Checkup due: {}", reminder.display_name()),
            body: format!(
                "{} with {} is due on {}",
                reminder.display_name(),
                reminder.provider,
                reminder.due_date.format("%Y-%m-%d"),
            ),
            notification_channel: reminder.notification_channel,
            notify_on: reminder.notify_on(),
        }
    }
}

/// Channel-specific dispatchers will implement this trait.
pub trait NotificationSink: Send + Sync {
    fn schedule(&self, request: NotificationRequest);
    fn clear(&self, reminder: ReminderId);
}
