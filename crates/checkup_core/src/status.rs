use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Upcoming,
    Today,
    Overdue,
    Completed,
}

impl ReminderStatus {
    pub fn parse(value: &str) -> Option<ReminderStatus> {
        match value.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Some(ReminderStatus::Upcoming),
            "today" => Some(ReminderStatus::Today),
            "overdue" => Some(ReminderStatus::Overdue),
            "completed" => Some(ReminderStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Upcoming => "upcoming",
            ReminderStatus::Today => "today",
            ReminderStatus::Overdue => "overdue",
            ReminderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the lifecycle status for a given day. Completion wins over any
/// date comparison; otherwise the due date is ranked against `today`.
pub fn derive_status(due_date: NaiveDate, today: NaiveDate, completed: bool) -> ReminderStatus {
    if completed {
        return ReminderStatus::Completed;
    }
    if due_date < today {
        ReminderStatus::Overdue
    } else if due_date == today {
        ReminderStatus::Today
    } else {
        ReminderStatus::Upcoming
    }
}

pub fn days_until_due(due_date: NaiveDate, today: NaiveDate) -> i64 {
    due_date.signed_duration_since(today).num_days()
}

pub fn due_label(due_date: NaiveDate, today: NaiveDate) -> String {
    let days = days_until_due(due_date, today);
    match days {
        0 => "due today".to_string(),
        d if d < 0 => format!("{} day{} overdue", -d, if d == -1 { "" } else { "s" }),
        d => format!("{} day{} until due", d, if d == 1 { "" } else { "s" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn completion_wins_over_any_due_date() {
        let today = date(2024, 6, 1);
        assert_eq!(
            derive_status(date(2023, 1, 1), today, true),
            ReminderStatus::Completed
        );
        assert_eq!(
            derive_status(date(2025, 1, 1), today, true),
            ReminderStatus::Completed
        );
    }

    #[test]
    fn due_before_today_is_overdue() {
        assert_eq!(
            derive_status(date(2024, 5, 22), date(2024, 6, 1), false),
            ReminderStatus::Overdue
        );
    }

    #[test]
    fn due_today_is_today() {
        assert_eq!(
            derive_status(date(2024, 6, 1), date(2024, 6, 1), false),
            ReminderStatus::Today
        );
    }

    #[test]
    fn due_after_today_is_upcoming() {
        assert_eq!(
            derive_status(date(2024, 6, 2), date(2024, 6, 1), false),
            ReminderStatus::Upcoming
        );
    }

    #[test]
    fn derivation_is_stable_for_identical_inputs() {
        let due = date(2024, 6, 15);
        let today = date(2024, 6, 1);
        assert_eq!(
            derive_status(due, today, false),
            derive_status(due, today, false)
        );
    }

    #[test]
    fn status_only_moves_forward_as_days_pass() {
        fn rank(status: ReminderStatus) -> u8 {
            match status {
                ReminderStatus::Upcoming => 0,
                ReminderStatus::Today => 1,
                ReminderStatus::Overdue => 2,
                ReminderStatus::Completed => 3,
            }
        }

        let due = date(2024, 6, 15);
        let mut previous = 0;
        for offset in -3..=3 {
            let today = due + chrono::Duration::days(offset);
            let current = rank(derive_status(due, today, false));
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn counts_signed_days_until_due() {
        let today = date(2024, 6, 1);
        assert_eq!(days_until_due(date(2024, 6, 4), today), 3);
        assert_eq!(days_until_due(today, today), 0);
        assert_eq!(days_until_due(date(2024, 5, 22), today), -10);
    }

    #[test]
    fn labels_overdue_reminders_with_the_day_count() {
        assert_eq!(
            due_label(date(2024, 5, 22), date(2024, 6, 1)),
            "10 days overdue"
        );
        assert_eq!(
            due_label(date(2024, 5, 31), date(2024, 6, 1)),
            "1 day overdue"
        );
    }

    #[test]
    fn labels_the_due_day_itself() {
        assert_eq!(due_label(date(2024, 6, 1), date(2024, 6, 1)), "due today");
    }

    #[test]
    fn labels_future_reminders_with_the_day_count() {
        assert_eq!(
            due_label(date(2024, 6, 4), date(2024, 6, 1)),
            "3 days until due"
        );
        assert_eq!(
            due_label(date(2024, 6, 2), date(2024, 6, 1)),
            "1 day until due"
        );
    }
}
