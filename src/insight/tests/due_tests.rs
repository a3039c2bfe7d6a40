//! Tests for due-date classification and labels.

use crate::insight::{DueLabel, DueStatus, Moment};
use crate::task::domain::Timestamp;
use crate::test_support::{days_from_now, hours_from_now, moment, now};
use chrono::{FixedOffset, NaiveDate};
use rstest::rstest;

#[rstest]
fn thirty_hours_ago_is_overdue_not_today(moment: Moment) {
    let status = DueStatus::classify(hours_from_now(-30), false, &moment);

    assert!(status.overdue);
    assert!(!status.due_today);
    assert_eq!(status.days_until, -1);
    assert_eq!(status.label(), DueLabel::Overdue);
}

#[rstest]
fn earlier_today_reads_today(moment: Moment) {
    let status = DueStatus::classify(hours_from_now(-10), false, &moment);

    assert!(status.due_today);
    assert!(!status.overdue);
    assert_eq!(status.label().to_string(), "Today");
}

#[rstest]
fn completed_task_is_never_overdue(moment: Moment) {
    let status = DueStatus::classify(days_from_now(-4), true, &moment);

    assert!(!status.overdue);
    assert_eq!(status.days_until, -4);
}

#[rstest]
#[case(1, "Tomorrow")]
#[case(2, "2d")]
#[case(7, "7d")]
#[case(8, "Mar 18")]
#[case(30, "Apr 9")]
fn label_precedence(moment: Moment, #[case] days: i64, #[case] expected: &str) {
    let status = DueStatus::classify(days_from_now(days), false, &moment);

    assert_eq!(status.label().to_string(), expected);
}

#[rstest]
fn far_date_label_carries_calendar_date(moment: Moment) {
    let status = DueStatus::classify(days_from_now(8), false, &moment);

    assert_eq!(
        status.label(),
        DueLabel::Date(NaiveDate::from_ymd_opt(2026, 3, 18).expect("valid date"))
    );
}

#[test]
fn calendar_days_follow_the_moment_offset() {
    let offset = FixedOffset::east_opt(3600).expect("valid offset");
    let moment = Moment::new(now().with_timezone(&offset));
    let late_evening = Timestamp::parse("2026-03-10T23:30:00Z").expect("valid timestamp");

    let status = DueStatus::classify(late_evening, false, &moment);

    assert!(status.due_tomorrow);
    assert!(!status.due_today);
    assert_eq!(status.days_until, 1);
}
