use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reminder::{Reminder, ReminderId};
use crate::status::{self, ReminderStatus};
use crate::store::ReminderStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderView {
    pub reminder: Reminder,
    pub status: ReminderStatus,
    pub days_until_due: i64,
    pub due_label: String,
    pub notify_on: NaiveDate,
}

impl ReminderView {
    pub(crate) fn from_reminder(reminder: Reminder, today: NaiveDate) -> Self {
        let status = reminder.status(today);
        let days_until_due = reminder.days_until_due(today);
        let due_label = status::due_label(reminder.due_date, today);
        let notify_on = reminder.notify_on();
        Self {
            reminder,
            status,
            days_until_due,
            due_label,
            notify_on,
        }
    }

    pub fn id(&self) -> ReminderId {
        self.reminder.id
    }
}

impl PartialOrd for ReminderView {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReminderView {
    fn cmp(&self, other: &Self) -> Ordering {
        self.reminder
            .due_date
            .cmp(&other.reminder.due_date)
            .then_with(|| self.reminder.id.cmp(&other.reminder.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ReminderStatus),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<StatusFilter> {
        let token = value.trim();
        if token.eq_ignore_ascii_case("all") {
            return Some(StatusFilter::All);
        }
        ReminderStatus::parse(token).map(StatusFilter::Only)
    }

    fn matches(&self, status: ReminderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(only) => *only == status,
        }
    }
}

impl From<ReminderStatus> for StatusFilter {
    fn from(status: ReminderStatus) -> Self {
        StatusFilter::Only(status)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub upcoming: usize,
    pub today: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: ReminderStatus) {
        match status {
            ReminderStatus::Upcoming => self.upcoming += 1,
            ReminderStatus::Today => self.today += 1,
            ReminderStatus::Overdue => self.overdue += 1,
            ReminderStatus::Completed => self.completed += 1,
        }
    }

    pub fn get(&self, status: ReminderStatus) -> usize {
        match status {
            ReminderStatus::Upcoming => self.upcoming,
            ReminderStatus::Today => self.today,
            ReminderStatus::Overdue => self.overdue,
            ReminderStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.upcoming + self.today + self.overdue + self.completed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub reminders: Vec<ReminderView>,
    pub counts: StatusCounts,
}

impl ReminderStore {
    /// Ordered by due date then id; statuses derive against `today` at call
    /// time, never cached.
    pub fn list_by_status(&self, filter: StatusFilter, today: NaiveDate) -> Vec<ReminderView> {
        let mut views: Vec<ReminderView> = self
            .cloned_records()
            .into_iter()
            .map(|reminder| ReminderView::from_reminder(reminder, today))
            .filter(|view| filter.matches(view.status))
            .collect();
        views.sort();
        views
    }

    pub fn counts_by_status(&self, today: NaiveDate) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for reminder in self.cloned_records() {
            counts.record(reminder.status(today));
        }
        counts
    }

    pub fn snapshot(&self, today: NaiveDate) -> ScheduleSnapshot {
        let reminders = self.list_by_status(StatusFilter::All, today);
        let mut counts = StatusCounts::default();
        for view in &reminders {
            counts.record(view.status);
        }
        ScheduleSnapshot { reminders, counts }
    }
}
