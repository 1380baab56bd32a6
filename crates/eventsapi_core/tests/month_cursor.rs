use chrono::{FixedOffset, TimeZone, Utc};
use eventsapi_core::{filter_past, sort_descending, EventRecord, MonthCursor};

#[test]
fn step_back_rolls_january_into_previous_december() {
    let mut cursor = MonthCursor::new(1, 2024).unwrap();
    cursor.step_back();
    assert_eq!((cursor.month(), cursor.year()), (12, 2023));
}

#[test]
fn step_back_within_year_keeps_year() {
    for month in 2..=12 {
        let mut cursor = MonthCursor::new(month, 2024).unwrap();
        cursor.step_back();
        assert_eq!((cursor.month(), cursor.year()), (month - 1, 2024));
    }
}

#[test]
fn twelve_steps_return_to_same_month_one_year_earlier() {
    for month in 1..=12 {
        let start = MonthCursor::new(month, 2024).unwrap();
        let mut cursor = start;
        for _ in 0..12 {
            cursor.step_back();
        }
        assert_eq!(cursor.month(), start.month());
        assert_eq!(cursor.year(), start.year() - 1);
    }
}

#[test]
fn current_month_uses_the_clock_timezone() {
    // 2024-04-01T00:30 at +11:00 is April locally and still March in UTC.
    let melbourne = FixedOffset::east_opt(11 * 3600).unwrap();
    let local = melbourne.with_ymd_and_hms(2024, 4, 1, 0, 30, 0).unwrap();
    let utc = local.with_timezone(&Utc);

    assert_eq!(MonthCursor::from_now(&local), MonthCursor::new(4, 2024).unwrap());
    assert_eq!(MonthCursor::from_now(&utc), MonthCursor::new(3, 2024).unwrap());
}

#[test]
fn filter_with_far_future_now_keeps_everything_and_far_past_keeps_nothing() {
    let records = vec![
        EventRecord::with_start_time("2019-06-01T10:00:00Z"),
        EventRecord::with_start_time("2024-03-10"),
        EventRecord::with_start_time("2031-12-24 18:00:00"),
    ];
    let far_future = Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();
    let far_past = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap();

    assert_eq!(filter_past(records.clone(), far_future), records);
    assert!(filter_past(records, far_past).is_empty());
}

#[test]
fn filter_never_keeps_records_without_start_time() {
    let far_future = Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();
    let records = vec![EventRecord::default(), EventRecord::with_start_time("someday")];
    assert!(filter_past(records, far_future).is_empty());
}

#[test]
fn sort_orders_mixed_formats_by_instant() {
    let sorted = sort_descending(vec![
        EventRecord::with_start_time("2024-03-10T09:00:00+11:00"),
        EventRecord::with_start_time("2024-03-10"),
        EventRecord::with_start_time("2024-03-09T23:00:00Z"),
    ]);
    let raw: Vec<_> = sorted.iter().filter_map(|r| r.raw_start_time()).collect();
    assert_eq!(
        raw,
        vec!["2024-03-10", "2024-03-09T23:00:00Z", "2024-03-10T09:00:00+11:00"]
    );
}
