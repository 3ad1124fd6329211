use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    Months,
    Years,
}

impl FrequencyUnit {
    pub fn parse(value: &str) -> Option<FrequencyUnit> {
        match value.trim().to_ascii_lowercase().as_str() {
            "months" | "month" => Some(FrequencyUnit::Months),
            "years" | "year" => Some(FrequencyUnit::Years),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyUnit::Months => "months",
            FrequencyUnit::Years => "years",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub amount: u32,
    pub unit: FrequencyUnit,
}

impl Recurrence {
    pub fn new(amount: u32, unit: FrequencyUnit) -> Self {
        Self {
            amount: amount.max(1),
            unit,
        }
    }
}

/// Advance a due date by one interval, clamping the day of month to the
/// target month's length; past the calendar range the result saturates.
pub fn advance(due_date: NaiveDate, recurrence: Recurrence) -> NaiveDate {
    match recurrence.unit {
        FrequencyUnit::Months => add_months(due_date, i64::from(recurrence.amount)),
        FrequencyUnit::Years => add_years(due_date, recurrence.amount),
    }
}

fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let total_months = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let target_month = (total_months.rem_euclid(12) + 1) as u32;
    let Ok(target_year) = i32::try_from(total_months.div_euclid(12)) else {
        return NaiveDate::MAX;
    };
    let day = date.day().min(days_in_month(target_year, target_month));
    NaiveDate::from_ymd_opt(target_year, target_month, day).unwrap_or(NaiveDate::MAX)
}

fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    let Ok(target_year) = i32::try_from(i64::from(date.year()) + i64::from(years)) else {
        return NaiveDate::MAX;
    };
    let target_month = date.month();
    let day = date.day().min(days_in_month(target_year, target_month));
    NaiveDate::from_ymd_opt(target_year, target_month, day).unwrap_or(NaiveDate::MAX)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn months(amount: u32) -> Recurrence {
        Recurrence::new(amount, FrequencyUnit::Months)
    }

    fn years(amount: u32) -> Recurrence {
        Recurrence::new(amount, FrequencyUnit::Years)
    }

    #[test]
    fn preserves_day_of_month_when_target_month_is_long_enough() {
        assert_eq!(advance(date(2024, 3, 10), months(1)), date(2024, 4, 10));
    }

    #[test]
    fn twelve_month_cycle_lands_on_the_anniversary() {
        assert_eq!(advance(date(2024, 1, 31), months(12)), date(2025, 1, 31));
    }

    #[test]
    fn clamps_january_31_to_leap_february_29() {
        assert_eq!(advance(date(2024, 1, 31), months(1)), date(2024, 2, 29));
    }

    #[test]
    fn clamps_january_31_to_february_28_outside_leap_years() {
        assert_eq!(advance(date(2023, 1, 31), months(1)), date(2023, 2, 28));
    }

    #[test]
    fn clamps_to_thirty_day_months() {
        assert_eq!(advance(date(2024, 5, 31), months(1)), date(2024, 6, 30));
    }

    #[test]
    fn december_rolls_into_the_next_year() {
        assert_eq!(advance(date(2024, 12, 15), months(1)), date(2025, 1, 15));
    }

    #[test]
    fn year_step_preserves_month_and_day() {
        assert_eq!(advance(date(2024, 5, 15), years(2)), date(2026, 5, 15));
    }

    #[test]
    fn leap_day_plus_one_year_clamps_to_february_28() {
        assert_eq!(advance(date(2024, 2, 29), years(1)), date(2025, 2, 28));
    }

    #[test]
    fn leap_day_plus_four_years_stays_on_leap_day() {
        assert_eq!(advance(date(2024, 2, 29), years(4)), date(2028, 2, 29));
    }

    #[test]
    fn century_years_are_not_leap_years() {
        assert_eq!(advance(date(2096, 2, 29), years(4)), date(2100, 2, 28));
    }

    #[test]
    fn single_step_matches_repeated_steps_on_plain_dates() {
        let start = date(2024, 7, 10);
        let mut stepped = start;
        for _ in 0..5 {
            stepped = advance(stepped, months(1));
        }
        assert_eq!(advance(start, months(5)), stepped);
    }

    #[test]
    fn advancing_always_moves_the_due_date_forward() {
        for &(year, month, day) in &[(2024, 1, 31), (2024, 2, 29), (2023, 12, 1)] {
            let start = date(year, month, day);
            assert!(advance(start, months(1)) > start);
            assert!(advance(start, years(1)) > start);
        }
    }

    #[test]
    fn saturates_past_the_calendar_range() {
        let far = advance(NaiveDate::MAX, years(1));
        assert_eq!(far, NaiveDate::MAX);
        assert_eq!(advance(far, months(6)), NaiveDate::MAX);
    }

    #[test]
    fn zero_amount_is_clamped_to_a_single_interval() {
        let recurrence = months(0);
        assert_eq!(recurrence.amount, 1);
    }

    #[test]
    fn unit_tokens_parse_case_insensitively() {
        assert_eq!(FrequencyUnit::parse("Months"), Some(FrequencyUnit::Months));
        assert_eq!(FrequencyUnit::parse(" years "), Some(FrequencyUnit::Years));
        assert_eq!(FrequencyUnit::parse("weeks"), None);
    }
}
