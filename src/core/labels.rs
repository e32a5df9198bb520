use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time label shape chosen from the visible time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLabelPattern {
    /// `HH:MM:SS`
    Second,
    /// `HH:MM`
    Minute,
    /// `YYYY-MM-DD`
    Date,
}

impl TimeLabelPattern {
    #[must_use]
    pub fn for_visible_span(visible_span_secs: f64) -> Self {
        if visible_span_secs <= 600.0 {
            Self::Second
        } else if visible_span_secs <= 172_800.0 {
            Self::Minute
        } else {
            Self::Date
        }
    }

    fn format_str(self) -> &'static str {
        match self {
            Self::Second => "%H:%M:%S",
            Self::Minute => "%H:%M",
            Self::Date => "%Y-%m-%d",
        }
    }
}

/// Formats unix seconds as a UTC label.
#[must_use]
pub fn format_time_label(timestamp: i64, pattern: TimeLabelPattern) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(time) => time.format(pattern.format_str()).to_string(),
        None => "n/a".to_owned(),
    }
}

/// Formats a price label with enough decimals to distinguish ticks `step` apart.
///
/// Two decimals minimum, more for sub-cent steps.
#[must_use]
pub fn format_price_label(price: f64, step: f64) -> String {
    if !price.is_finite() {
        return "nan".to_owned();
    }
    let decimals = if step.is_finite() && step > 0.0 && step < 0.01 {
        (-step.log10() - 1e-9).ceil().clamp(2.0, 12.0) as usize
    } else {
        2
    };
    format!("{price:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::{TimeLabelPattern, format_price_label, format_time_label};

    #[test]
    fn minute_labels_use_utc_clock() {
        // 2024-01-02T09:30:00Z
        let label = format_time_label(1_704_187_800, TimeLabelPattern::Minute);
        assert_eq!(label, "09:30");
    }

    #[test]
    fn price_labels_widen_for_small_steps() {
        assert_eq!(format_price_label(101.5, 0.5), "101.50");
        assert_eq!(format_price_label(1.23456, 0.001), "1.235");
    }

    #[test]
    fn pattern_follows_span() {
        assert_eq!(TimeLabelPattern::for_visible_span(300.0), TimeLabelPattern::Second);
        assert_eq!(TimeLabelPattern::for_visible_span(7_200.0), TimeLabelPattern::Minute);
        assert_eq!(TimeLabelPattern::for_visible_span(864_000.0), TimeLabelPattern::Date);
    }
}
