//! Alert Calculator
//!
//! Rolling 90-day annuity deadline window. Recomputed reactively on every
//! store change via a Memo in the App component.

use chrono::NaiveDate;

use crate::models::{Patent, PatentStatus};

/// Width of the alert window in days
pub const ALERT_WINDOW_DAYS: i64 = 90;

/// True when the annuity fee is due within the next 90 days.
///
/// Boundaries are strict: due today does not alert, due in exactly 90
/// days does, 91 does not. Non-Active records never alert.
pub fn is_due_soon(p: &Patent, today: NaiveDate) -> bool {
    if p.status != PatentStatus::Active {
        return false;
    }
    match p.annuity_date {
        Some(due) => {
            let days = (due - today).num_days();
            days > 0 && days <= ALERT_WINDOW_DAYS
        }
        None => false,
    }
}

/// Count of patents inside the alert window
pub fn count_due_soon(patents: &[Patent], today: NaiveDate) -> usize {
    patents.iter().filter(|p| is_due_soon(p, today)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatentDraft;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn patent(status: PatentStatus, due_in_days: Option<i64>) -> Patent {
        let mut p = PatentDraft {
            name: "测试专利".to_string(),
            annuity_date: due_in_days.map(|n| today() + Duration::days(n)),
            ..Default::default()
        }
        .into_patent(1);
        p.status = status;
        p
    }

    #[test]
    fn window_boundaries_are_strict() {
        for (days, expected) in [(0, false), (1, true), (45, true), (90, true), (91, false)] {
            let p = patent(PatentStatus::Active, Some(days));
            assert_eq!(is_due_soon(&p, today()), expected, "due in {} days", days);
        }
    }

    #[test]
    fn past_dates_never_alert() {
        let p = patent(PatentStatus::Active, Some(-10));
        assert!(!is_due_soon(&p, today()));
    }

    #[test]
    fn non_active_records_never_alert() {
        for status in [PatentStatus::Expired, PatentStatus::UnderExamination] {
            let p = patent(status, Some(30));
            assert!(!is_due_soon(&p, today()));
        }
    }

    #[test]
    fn records_without_a_date_are_excluded() {
        let p = patent(PatentStatus::Active, None);
        assert!(!is_due_soon(&p, today()));
    }

    #[test]
    fn count_scans_the_whole_set() {
        let patents = vec![
            patent(PatentStatus::Active, Some(30)),
            patent(PatentStatus::Active, Some(90)),
            patent(PatentStatus::Active, Some(91)),
            patent(PatentStatus::Expired, Some(30)),
            patent(PatentStatus::Active, None),
        ];
        assert_eq!(count_due_soon(&patents, today()), 2);
    }
}
