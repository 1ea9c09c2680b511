// Calendar behavior of the reporting window and the gap filler: the series
// always covers every calendar unit from the window start through "now"
// inclusive, with contiguous keys, whatever the data looks like.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use elara::modules::analytics::models::{Period, TimeBucket};
use elara::modules::analytics::services::AnalyticsService;

#[test]
fn week_series_always_has_eight_daily_points() {
    for (y, m, d) in [(2025, 8, 6), (2025, 1, 3), (2024, 2, 29), (2025, 12, 31)] {
        let now = Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap();
        let summary = AnalyticsService::aggregate(Period::Week, now, &[], 0, vec![], &[]);

        assert_eq!(summary.chart_data.len(), 8, "at {}-{}-{}", y, m, d);
    }
}

#[test]
fn month_series_spans_the_previous_calendar_month() {
    // Mar 15 back to Feb 15: 29 days inclusive
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap();
    let summary = AnalyticsService::aggregate(Period::Month, now, &[], 0, vec![], &[]);
    assert_eq!(summary.chart_data.len(), 29);

    // Mar 31 clamps to Feb 28: 32 days inclusive
    let now = Utc.with_ymd_and_hms(2025, 3, 31, 10, 0, 0).unwrap();
    let summary = AnalyticsService::aggregate(Period::Month, now, &[], 0, vec![], &[]);
    assert_eq!(summary.chart_data.len(), 32);

    // Aug 6 back to Jul 6: 32 days inclusive
    let now = Utc.with_ymd_and_hms(2025, 8, 6, 10, 0, 0).unwrap();
    let summary = AnalyticsService::aggregate(Period::Month, now, &[], 0, vec![], &[]);
    assert_eq!(summary.chart_data.len(), 32);
}

#[test]
fn year_series_has_thirteen_monthly_points() {
    for (y, m, d) in [(2025, 8, 6), (2025, 2, 28), (2024, 12, 31)] {
        let now = Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap();
        let summary = AnalyticsService::aggregate(Period::Year, now, &[], 0, vec![], &[]);

        assert_eq!(summary.chart_data.len(), 13, "at {}-{}-{}", y, m, d);
    }
}

#[test]
fn daily_series_keys_are_contiguous() {
    let now = Utc.with_ymd_and_hms(2025, 3, 31, 10, 0, 0).unwrap();
    let summary = AnalyticsService::aggregate(Period::Month, now, &[], 0, vec![], &[]);

    let dates: Vec<NaiveDate> = summary
        .chart_data
        .iter()
        .map(|p| NaiveDate::parse_from_str(&p.date, "%Y-%m-%d").unwrap())
        .collect();

    for pair in dates.windows(2) {
        assert_eq!(pair[1], pair[0].succ_opt().unwrap());
    }
    assert_eq!(*dates.last().unwrap(), now.date_naive());
}

#[test]
fn monthly_series_keys_advance_month_by_month() {
    let now = Utc.with_ymd_and_hms(2025, 8, 6, 10, 0, 0).unwrap();
    let summary = AnalyticsService::aggregate(Period::Year, now, &[], 0, vec![], &[]);

    let months: Vec<(i32, u32)> = summary
        .chart_data
        .iter()
        .map(|p| {
            let date = NaiveDate::parse_from_str(&format!("{}-01", p.date), "%Y-%m-%d").unwrap();
            (date.year(), date.month())
        })
        .collect();

    for pair in months.windows(2) {
        let (y, m) = pair[0];
        let expected = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
        assert_eq!(pair[1], expected);
    }
}

#[test]
fn labels_match_bucket_granularity() {
    let now = Utc.with_ymd_and_hms(2025, 8, 6, 10, 0, 0).unwrap();

    let weekly = AnalyticsService::aggregate(Period::Week, now, &[], 0, vec![], &[]);
    assert_eq!(weekly.chart_data.last().unwrap().name, "Aug 6");

    let yearly = AnalyticsService::aggregate(Period::Year, now, &[], 0, vec![], &[]);
    assert_eq!(yearly.chart_data.last().unwrap().name, "Aug");
}

#[test]
fn bucket_advance_clamps_short_months() {
    let jan31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let next = TimeBucket::Month.advance(jan31).unwrap();
    assert_eq!(next, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
}
