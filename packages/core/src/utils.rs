// ABOUTME: Shared utility functions for Dayboard
// ABOUTME: ID generation and calendar date helpers

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Generate a prefixed unique id, e.g. `proj-V1StGXR8_Z`
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, nanoid::nanoid!(10))
}

/// Today's date in the local timezone, used as the daily task key
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday of the week containing `date`, used as the weekly task key
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_has_prefix() {
        let id1 = generate_id("task");
        let id2 = generate_id("task");

        assert!(id1.starts_with("task-"));
        assert_eq!(id1.len(), "task-".len() + 10);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_week_start() {
        // 2024-01-03 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(week_start(wednesday), monday);
        assert_eq!(week_start(monday), monday);

        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(week_start(sunday), monday);
    }
}
