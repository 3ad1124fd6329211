use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::recurrence::Recurrence;
use crate::status::{self, ReminderStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderId(u64);

impl ReminderId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckupType {
    AnnualPhysical,
    Dental,
    Vision,
    Specialist,
    Vaccination,
    Lab,
    Screening,
    Other,
}

impl CheckupType {
    pub fn parse(value: &str) -> Option<CheckupType> {
        match value.trim().to_ascii_lowercase().as_str() {
            "annual_physical" => Some(CheckupType::AnnualPhysical),
            "dental" => Some(CheckupType::Dental),
            "vision" => Some(CheckupType::Vision),
            "specialist" => Some(CheckupType::Specialist),
            "vaccination" => Some(CheckupType::Vaccination),
            "lab" => Some(CheckupType::Lab),
            "screening" => Some(CheckupType::Screening),
            "other" => Some(CheckupType::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckupType::AnnualPhysical => "annual_physical",
            CheckupType::Dental => "dental",
            CheckupType::Vision => "vision",
            CheckupType::Specialist => "specialist",
            CheckupType::Vaccination => "vaccination",
            CheckupType::Lab => "lab",
            CheckupType::Screening => "screening",
            CheckupType::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckupType::AnnualPhysical => "Annual physical",
            CheckupType::Dental => "Dental checkup",
            CheckupType::Vision => "Vision exam",
            CheckupType::Specialist => "Specialist visit",
            CheckupType::Vaccination => "Vaccination",
            CheckupType::Lab => "Lab work",
            CheckupType::Screening => "Health screening",
            CheckupType::Other => "Other checkup",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Sms,
    Push,
}

impl NotificationChannel {
    pub fn parse(value: &str) -> Option<NotificationChannel> {
        match value.trim().to_ascii_lowercase().as_str() {
            "email" => Some(NotificationChannel::Email),
            "sms" => Some(NotificationChannel::Sms),
            "push" => Some(NotificationChannel::Push),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Sms => "sms",
            NotificationChannel::Push => "push",
        }
    }
}

/// One scheduled or recurring health checkup. Status is never stored; reads
/// derive it against a caller-supplied `today`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub checkup_type: CheckupType,
    pub due_date: NaiveDate,
    pub provider: String,
    pub notes: Option<String>,
    pub lead_days: u32,
    pub notification_channel: NotificationChannel,
    pub recurrence: Option<Recurrence>,
    pub completed: bool,
}

impl Reminder {
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    pub fn display_name(&self) -> &'static str {
        self.checkup_type.display_name()
    }

    pub fn status(&self, today: NaiveDate) -> ReminderStatus {
        status::derive_status(self.due_date, today, self.completed)
    }

    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        status::days_until_due(self.due_date, today)
    }

    pub fn notify_on(&self) -> NaiveDate {
        self.due_date
            .checked_sub_days(Days::new(u64::from(self.lead_days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    pub checkup_type: String,
    pub due_date: String,
    pub provider: String,
    pub notes: Option<String>,
    pub lead_days: i64,
    pub notification_channel: String,
    #[serde(default)]
    pub recurring: bool,
    pub frequency_value: Option<i64>,
    pub frequency_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub checkup_type: CheckupType,
    pub due_date: NaiveDate,
    pub provider: String,
    pub notes: Option<String>,
    pub lead_days: u32,
    pub notification_channel: NotificationChannel,
    pub recurrence: Option<Recurrence>,
}

impl NewReminder {
    pub(crate) fn into_reminder(self, id: ReminderId) -> Reminder {
        Reminder {
            id,
            checkup_type: self.checkup_type,
            due_date: self.due_date,
            provider: self.provider,
            notes: self.notes,
            lead_days: self.lead_days,
            notification_channel: self.notification_channel,
            recurrence: self.recurrence,
            completed: false,
        }
    }
}

/// Absent fields are left unchanged; whitespace-only `notes` clears the notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatch {
    pub provider: Option<String>,
    pub notes: Option<String>,
    pub lead_days: Option<i64>,
    pub notification_channel: Option<String>,
}
