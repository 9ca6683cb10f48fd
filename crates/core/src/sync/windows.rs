//! Date-range splitting against an endpoint's maximum span.

use chrono::{Days, NaiveDate};
use shelfsync_domain::{DateWindow, Result, ShelfsyncError};

/// Split `[from, to]` into contiguous sub-windows of at most
/// `max_span_days` days each.
///
/// The windows are chronological, non-overlapping, gap-free, and their
/// union is exactly the requested range. A range that already fits the
/// span produces a single window.
pub fn split_windows(from: NaiveDate, to: NaiveDate, max_span_days: i64) -> Result<Vec<DateWindow>> {
    if from > to {
        return Err(ShelfsyncError::InvalidInput(format!(
            "window start {from} is after end {to}"
        )));
    }
    if max_span_days < 1 {
        return Err(ShelfsyncError::InvalidInput(format!(
            "max span must be at least one day, got {max_span_days}"
        )));
    }

    let span = Days::new(max_span_days as u64 - 1);
    let mut windows = Vec::new();
    let mut current = from;

    while current <= to {
        let end = current.checked_add_days(span).map_or(to, |candidate| candidate.min(to));
        windows.push(DateWindow::new(current, end));

        match end.checked_add_days(Days::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn range_within_span_is_one_window() {
        let windows = split_windows(date("2025-01-01"), date("2025-01-31"), 31).unwrap();
        assert_eq!(windows, vec![DateWindow::new(date("2025-01-01"), date("2025-01-31"))]);
    }

    #[test]
    fn ninety_five_days_split_into_four() {
        // Day 1-31, 32-62, 63-93, 94-95.
        let windows = split_windows(date("2025-01-01"), date("2025-04-05"), 31).unwrap();

        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0], DateWindow::new(date("2025-01-01"), date("2025-01-31")));
        assert_eq!(windows[1], DateWindow::new(date("2025-02-01"), date("2025-03-03")));
        assert_eq!(windows[2], DateWindow::new(date("2025-03-04"), date("2025-04-03")));
        assert_eq!(windows[3], DateWindow::new(date("2025-04-04"), date("2025-04-05")));
    }

    #[test]
    fn windows_are_contiguous_and_cover_the_range() {
        let from = date("2024-11-15");
        let to = date("2025-02-20");
        let windows = split_windows(from, to, 29).unwrap();

        assert_eq!(windows.first().unwrap().from, from);
        assert_eq!(windows.last().unwrap().to, to);
        for pair in windows.windows(2) {
            // No gap, no overlap: each window starts the day after the
            // previous one ends.
            assert_eq!(pair[0].to.succ_opt().unwrap(), pair[1].from);
        }
        for w in &windows {
            assert!(w.days() <= 29);
        }
    }

    #[test]
    fn single_day_range() {
        let windows = split_windows(date("2025-05-05"), date("2025-05-05"), 31).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].days(), 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = split_windows(date("2025-02-01"), date("2025-01-01"), 31);
        assert!(result.is_err());
    }

    #[test]
    fn zero_span_is_rejected() {
        let result = split_windows(date("2025-01-01"), date("2025-01-02"), 0);
        assert!(result.is_err());
    }
}
