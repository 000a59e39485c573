//! Maps normalized time slots onto World Bank API query parameters.

use question_parser::{Slots, TimeMode};

/// Builds the time query fragment for one request.
///
/// Returns the parameter string and the explicitly requested year, if any —
/// the caller compares the requested year against the year actually served
/// to flag gap-filled answers.
///
/// Unspecified time falls back to `mrv=1&gapfill=y`: most-recent value with
/// gap filling, the least surprising default for "what is X" questions.
pub fn build_time_param(slots: &Slots) -> (String, Option<i32>) {
    match slots.time_mode {
        TimeMode::Single => {
            if let Some(year) = slots.year {
                return (format!("date={year}"), Some(year));
            }
        }
        TimeMode::Range => {
            if let (Some(start), Some(end)) = (slots.start_year, slots.end_year) {
                return (format!("date={start}:{end}"), None);
            }
        }
        TimeMode::LatestN => {
            if let Some(n) = slots.latest_n {
                return (format!("mrv={n}&gapfill=y"), None);
            }
        }
    }

    ("mrv=1&gapfill=y".to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_year() {
        let slots = Slots {
            year: Some(2022),
            ..Slots::default()
        };
        assert_eq!(build_time_param(&slots), ("date=2022".to_string(), Some(2022)));
    }

    #[test]
    fn range() {
        let slots = Slots {
            time_mode: TimeMode::Range,
            start_year: Some(2010),
            end_year: Some(2020),
            ..Slots::default()
        };
        assert_eq!(build_time_param(&slots), ("date=2010:2020".to_string(), None));
    }

    #[test]
    fn latest_n() {
        let slots = Slots {
            time_mode: TimeMode::LatestN,
            latest_n: Some(1),
            ..Slots::default()
        };
        assert_eq!(
            build_time_param(&slots),
            ("mrv=1&gapfill=y".to_string(), None)
        );
    }

    #[test]
    fn missing_year_defaults_to_most_recent() {
        let slots = Slots::default();
        assert_eq!(
            build_time_param(&slots),
            ("mrv=1&gapfill=y".to_string(), None)
        );
    }
}
