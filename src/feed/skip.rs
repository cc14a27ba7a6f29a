//! `skipHours` and `skipDays` blocks.
//!
//! Both lists are set-like and bounded: at most 24 hours in `0..=23` and at
//! most seven weekday names. Checks run in order: length, duplicates, then
//! membership.

use std::collections::HashSet;
use std::hash::Hash;

use super::error::FeedError;
use crate::xml::Element;

pub const MAX_SKIP_HOURS: usize = 24;
pub const MAX_SKIP_DAYS: usize = 7;

/// Day names accepted by `skipDays`, case-sensitive.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub(crate) fn skip_hours_element(hours: &[u8]) -> Result<Element, FeedError> {
    check_bounds("skipHours", hours, MAX_SKIP_HOURS, "hours")?;

    let mut element = Element::new("skipHours");
    for &hour in hours {
        if usize::from(hour) >= MAX_SKIP_HOURS {
            return Err(FeedError::OutOfRange {
                field: "skipHours hour",
                value: i64::from(hour),
                min: 0,
                max: 23,
            });
        }
        element.append_child(Element::with_text("hour", hour.to_string()));
    }
    Ok(element)
}

pub(crate) fn skip_days_element<S: AsRef<str>>(days: &[S]) -> Result<Element, FeedError> {
    let days: Vec<&str> = days.iter().map(AsRef::as_ref).collect();
    check_bounds("skipDays", days.as_slice(), MAX_SKIP_DAYS, "days")?;

    let mut element = Element::new("skipDays");
    for day in days {
        if !WEEKDAYS.contains(&day) {
            return Err(FeedError::InvalidEnumValue {
                field: "skipDays day",
                value: day.to_owned(),
                allowed: WEEKDAYS.join(", "),
            });
        }
        element.append_child(Element::with_text("day", day));
    }
    Ok(element)
}

fn check_bounds<T: Eq + Hash>(
    field: &'static str,
    values: &[T],
    max: usize,
    unit: &str,
) -> Result<(), FeedError> {
    if values.len() > max {
        return Err(FeedError::DuplicateValue {
            field,
            reason: format!("maximum {max} {unit} allowed, got {}", values.len()),
        });
    }
    let distinct: HashSet<&T> = values.iter().collect();
    if distinct.len() != values.len() {
        return Err(FeedError::DuplicateValue {
            field,
            reason: "values must be unique".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(element: &Element) -> Vec<String> {
        element.elements().map(Element::text).collect()
    }

    #[test]
    fn test_hours_keep_order() {
        let element = skip_hours_element(&[1, 2, 3, 4]).unwrap();
        assert_eq!(element.name(), "skipHours");
        assert!(element.elements().all(|e| e.name() == "hour"));
        assert_eq!(texts(&element), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_all_hours_allowed() {
        let hours: Vec<u8> = (0..24).collect();
        assert_eq!(skip_hours_element(&hours).unwrap().elements().count(), 24);
    }

    #[test]
    fn test_duplicate_hour_rejected() {
        let err = skip_hours_element(&[1, 1]).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateValue { .. }));
    }

    #[test]
    fn test_too_many_hours_rejected() {
        let hours: Vec<u8> = (0..25).collect();
        let err = skip_hours_element(&hours).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateValue { .. }));
        assert!(err.to_string().contains("maximum 24"));
    }

    #[test]
    fn test_hour_out_of_range() {
        let err = skip_hours_element(&[23, 24]).unwrap_err();
        assert!(matches!(
            err,
            FeedError::OutOfRange { value: 24, max: 23, .. }
        ));
    }

    #[test]
    fn test_days_keep_order() {
        let element = skip_days_element(&["Monday", "Sunday"]).unwrap();
        assert_eq!(texts(&element), ["Monday", "Sunday"]);
    }

    #[test]
    fn test_unknown_day_lists_vocabulary() {
        let err = skip_days_element(&["Funday"]).unwrap_err();
        assert!(matches!(err, FeedError::InvalidEnumValue { .. }));
        let msg = err.to_string();
        assert!(msg.contains("Funday"));
        assert!(msg.contains("Monday, Tuesday"));
    }

    #[test]
    fn test_day_names_are_case_sensitive() {
        assert!(skip_days_element(&["monday"]).is_err());
        // Exact-duplicate check only: different case is not a duplicate,
        // but the lowercase name fails the vocabulary check.
        let err = skip_days_element(&["Monday", "monday"]).unwrap_err();
        assert!(matches!(err, FeedError::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_duplicate_day_rejected() {
        let err = skip_days_element(&["Monday", "Monday"]).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateValue { .. }));
    }

    #[test]
    fn test_eight_days_rejected() {
        let mut days = WEEKDAYS.to_vec();
        days.push("Monday");
        let err = skip_days_element(days.as_slice()).unwrap_err();
        assert!(err.to_string().contains("maximum 7"));
    }
}
