//! Calendar-day window used to select programmes
//!
//! The feed covers programmes from 5:00 today to 4:59 several days later.
//! Requests are limited to [`MAX_DAYS`] days ahead; longer spans are
//! clamped with a warning.

use chrono::{DateTime, Days, FixedOffset, NaiveDate};

use super::reporter::{TransformReporter, TransformWarning};

/// Farthest day the feed carries programmes for, counted from today
pub const MAX_DAYS: u32 = 5;

/// Number of days actually covered for a request.
///
/// When `days + offset` goes past [`MAX_DAYS`] the span is reduced to what
/// remains before the limit and a warning is reported. The result is zero
/// or negative when `offset` alone reaches the limit.
pub fn effective_days(days: u32, offset: u32, reporter: &dyn TransformReporter) -> i64 {
    let max_days = i64::from(MAX_DAYS);
    let (requested, start) = (i64::from(days), i64::from(offset));

    if requested + start <= max_days {
        return requested;
    }

    let effective = (max_days - start).min(max_days);
    reporter.report(TransformWarning::SpanClamped {
        requested_days: days,
        offset,
        effective_days: effective,
        max_days: MAX_DAYS,
    });
    effective
}

/// Inclusive range of calendar days a programme must overlap to be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    bounds: Option<(NaiveDate, NaiveDate)>,
}

impl DateWindow {
    /// Window of `days` days starting `offset` days after `today`, clamped
    /// to the feed's look-ahead
    pub fn new(today: NaiveDate, days: u32, offset: u32, reporter: &dyn TransformReporter) -> Self {
        let effective = effective_days(days, offset, reporter);
        Self::from_span(today, offset, effective)
    }

    fn from_span(today: NaiveDate, offset: u32, days: i64) -> Self {
        if days <= 0 {
            return Self::empty();
        }
        let bounds = today
            .checked_add_days(Days::new(u64::from(offset)))
            .and_then(|first| {
                let span = u64::try_from(days - 1).ok()?;
                first.checked_add_days(Days::new(span)).map(|last| (first, last))
            });
        Self { bounds }
    }

    /// A window that keeps nothing
    pub fn empty() -> Self {
        Self { bounds: None }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.bounds.map(|(first, _)| first)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.bounds.map(|(_, last)| last)
    }

    /// Whether a programme running from `start` to `stop` overlaps the
    /// window. Dates are compared in each timestamp's own offset.
    pub fn contains(&self, start: &DateTime<FixedOffset>, stop: &DateTime<FixedOffset>) -> bool {
        match self.bounds {
            Some((first, last)) => stop.date_naive() >= first && start.date_naive() <= last,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::reporter::RecordingReporter;
    use crate::utils::datetime::parse_xmltv_datetime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn ts(value: &str) -> DateTime<FixedOffset> {
        parse_xmltv_datetime(value).unwrap()
    }

    #[test]
    fn test_single_day_window() {
        let reporter = RecordingReporter::new();
        let window = DateWindow::new(today(), 1, 0, &reporter);

        assert_eq!(window.first_day(), Some(today()));
        assert_eq!(window.last_day(), Some(today()));
        assert!(reporter.warnings().is_empty());

        // Today to today is kept
        assert!(window.contains(&ts("20240105200000 +0100"), &ts("20240105210000 +0100")));
        // Ended yesterday
        assert!(!window.contains(&ts("20240104200000 +0100"), &ts("20240104210000 +0100")));
        // Starts tomorrow
        assert!(!window.contains(&ts("20240106060000 +0100"), &ts("20240106070000 +0100")));
        // Overlaps midnight on both sides
        assert!(window.contains(&ts("20240104233000 +0100"), &ts("20240105003000 +0100")));
        assert!(window.contains(&ts("20240105233000 +0100"), &ts("20240106003000 +0100")));
    }

    #[test]
    fn test_offset_moves_window() {
        let reporter = RecordingReporter::new();
        let window = DateWindow::new(today(), 2, 1, &reporter);

        assert_eq!(window.first_day(), NaiveDate::from_ymd_opt(2024, 1, 6));
        assert_eq!(window.last_day(), NaiveDate::from_ymd_opt(2024, 1, 7));
        assert!(!window.contains(&ts("20240105200000 +0100"), &ts("20240105210000 +0100")));
    }

    #[test]
    fn test_span_is_clamped_with_warning() {
        let reporter = RecordingReporter::new();
        let clamped = DateWindow::new(today(), 10, 0, &reporter);
        let limit = DateWindow::new(today(), 5, 0, &RecordingReporter::new());

        assert_eq!(clamped, limit);
        assert_eq!(clamped.last_day(), NaiveDate::from_ymd_opt(2024, 1, 9));
        assert_eq!(
            reporter.warnings(),
            vec![TransformWarning::SpanClamped {
                requested_days: 10,
                offset: 0,
                effective_days: 5,
                max_days: 5,
            }]
        );
    }

    #[test]
    fn test_clamp_accounts_for_offset() {
        let reporter = RecordingReporter::new();
        assert_eq!(effective_days(4, 3, &reporter), 2);
        assert_eq!(effective_days(2, 3, &reporter), 2);
        assert_eq!(reporter.warnings().len(), 1);
    }

    #[test]
    fn test_offset_past_limit_keeps_nothing() {
        let reporter = RecordingReporter::new();
        let window = DateWindow::new(today(), 1, 7, &reporter);

        assert!(window.is_empty());
        assert!(!window.contains(&ts("20240112200000 +0100"), &ts("20240112210000 +0100")));
        assert_eq!(effective_days(1, 7, &RecordingReporter::new()), -2);
    }

    #[test]
    fn test_zero_days_keeps_nothing() {
        let window = DateWindow::new(today(), 0, 0, &RecordingReporter::new());
        assert!(window.is_empty());
    }
}
