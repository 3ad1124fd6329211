use chrono::NaiveDate;
use thiserror::Error;

use crate::recurrence::{FrequencyUnit, Recurrence};
use crate::reminder::{CheckupType, NewReminder, NotificationChannel, ReminderDraft};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unrecognized checkup type `{0}`")]
    UnknownCheckupType(String),
    #[error("`{0}` is not a calendar date in YYYY-MM-DD form")]
    InvalidDueDate(String),
    #[error("provider must not be empty")]
    MissingProvider,
    #[error("frequency value must be a positive whole number for recurring reminders")]
    InvalidFrequencyValue,
    #[error("frequency unit must be `months` or `years`")]
    InvalidFrequencyUnit,
    #[error("lead days must be a positive whole number")]
    InvalidLeadDays,
    #[error("unrecognized notification channel `{0}`")]
    UnknownChannel(String),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::UnknownCheckupType(_) => "checkupType",
            ValidationError::InvalidDueDate(_) => "dueDate",
            ValidationError::MissingProvider => "provider",
            ValidationError::InvalidFrequencyValue => "frequencyValue",
            ValidationError::InvalidFrequencyUnit => "frequencyUnit",
            ValidationError::InvalidLeadDays => "leadDays",
            ValidationError::UnknownChannel(_) => "notificationChannel",
        }
    }
}

/// Check a draft in form order; the first failing check wins and nothing
/// reaches the store on failure.
pub fn validate(draft: &ReminderDraft) -> Result<NewReminder, ValidationError> {
    let checkup_type = parse_checkup_type(&draft.checkup_type)?;
    let due_date = parse_due_date(&draft.due_date)?;
    let provider = parse_provider(&draft.provider)?;

    let recurrence = if draft.recurring {
        let amount = parse_frequency_value(draft.frequency_value)?;
        let unit = parse_frequency_unit(draft.frequency_unit.as_deref())?;
        Some(Recurrence::new(amount, unit))
    } else {
        None
    };

    let lead_days = parse_lead_days(draft.lead_days)?;
    let notification_channel = parse_channel(&draft.notification_channel)?;

    Ok(NewReminder {
        checkup_type,
        due_date,
        provider,
        notes: draft.notes.as_deref().and_then(normalize_notes),
        lead_days,
        notification_channel,
        recurrence,
    })
}

fn parse_checkup_type(raw: &str) -> Result<CheckupType, ValidationError> {
    CheckupType::parse(raw).ok_or_else(|| ValidationError::UnknownCheckupType(raw.to_string()))
}

pub(crate) fn parse_due_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDueDate(raw.to_string()))
}

pub(crate) fn parse_provider(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingProvider);
    }
    Ok(trimmed.to_string())
}

fn parse_frequency_value(raw: Option<i64>) -> Result<u32, ValidationError> {
    raw.and_then(|value| u32::try_from(value).ok())
        .filter(|value| *value > 0)
        .ok_or(ValidationError::InvalidFrequencyValue)
}

fn parse_frequency_unit(raw: Option<&str>) -> Result<FrequencyUnit, ValidationError> {
    raw.and_then(FrequencyUnit::parse)
        .ok_or(ValidationError::InvalidFrequencyUnit)
}

pub(crate) fn parse_lead_days(raw: i64) -> Result<u32, ValidationError> {
    u32::try_from(raw)
        .ok()
        .filter(|value| *value > 0)
        .ok_or(ValidationError::InvalidLeadDays)
}

pub(crate) fn parse_channel(raw: &str) -> Result<NotificationChannel, ValidationError> {
    NotificationChannel::parse(raw).ok_or_else(|| ValidationError::UnknownChannel(raw.to_string()))
}

pub(crate) fn normalize_notes(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
