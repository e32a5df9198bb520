use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};

use crate::core::Bar;

/// Unique UTC calendar dates present in `bars`, weekends skipped, in order.
#[must_use]
pub fn trading_dates(bars: &[Bar]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for bar in bars {
        let Some(time) = DateTime::<Utc>::from_timestamp(bar.timestamp, 0) else {
            continue;
        };
        let date = time.date_naive();
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        if dates.last() != Some(&date) {
            dates.push(date);
        }
    }
    dates
}

/// Index of the bar that starts exactly at `date` + `time` (UTC).
#[must_use]
pub fn index_at(bars: &[Bar], date: NaiveDate, time: NaiveTime) -> Option<usize> {
    let target = date.and_time(time).and_utc().timestamp();
    bars.binary_search_by_key(&target, |bar| bar.timestamp).ok()
}

/// Up to `count` dates before `selected` followed by `selected` itself.
///
/// Returns an empty slice when `selected` is not a trading date.
#[must_use]
pub fn previous_trading_dates(
    dates: &[NaiveDate],
    selected: NaiveDate,
    count: usize,
) -> &[NaiveDate] {
    match dates.iter().position(|date| *date == selected) {
        Some(index) => &dates[index.saturating_sub(count)..=index],
        None => &[],
    }
}
