use thiserror::Error;

/// Errors raised while assembling or writing a feed.
///
/// Validation errors are reported by the setter or `build()` call that
/// detects them; nothing is deferred to render time.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A required element is absent at build time.
    #[error("Missing required {element} elements: {requirement}")]
    MissingRequiredField {
        element: &'static str,
        requirement: String,
    },

    /// A value outside a fixed vocabulary (language code, weekday name).
    #[error("Invalid {field} value '{value}'. Allowed values: {allowed}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// A numeric value outside its legal range.
    #[error("{field} value {value} is out of range ({min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Repeated entries in a set-like list, or a list over its maximum length.
    #[error("Invalid {field}: {reason}")]
    DuplicateValue { field: &'static str, reason: String },

    /// A setter was called before the block it belongs to was started.
    #[error("{0}")]
    PreconditionViolation(String),

    /// The output sink could not be written.
    #[error("Failed to write feed: {0}")]
    Serialization(#[from] std::io::Error),
}

impl FeedError {
    /// Fails with [`FeedError::MissingRequiredField`] naming every part whose
    /// flag is `false`.
    pub(crate) fn require_all(element: &'static str, parts: &[(&str, bool)]) -> Result<(), Self> {
        let missing: Vec<&str> = parts
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(FeedError::MissingRequiredField {
            element,
            requirement: format!(
                "all of {} are required, missing {}",
                join_names(parts.iter().map(|(name, _)| *name)),
                missing.join(", ")
            ),
        })
    }
}

/// Joins names as `a, b and c`.
pub(crate) fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.into_iter().collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_owned(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_names() {
        assert_eq!(join_names([]), "");
        assert_eq!(join_names(["title"]), "title");
        assert_eq!(
            join_names(["title", "link", "description"]),
            "title, link and description"
        );
    }

    #[test]
    fn test_require_all_names_every_part() {
        let err = FeedError::require_all(
            "channel",
            &[("title", true), ("link", false), ("description", false)],
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("title, link and description"), "{msg}");
        assert!(msg.contains("missing link, description"), "{msg}");
    }

    #[test]
    fn test_require_all_passes_when_complete() {
        assert!(FeedError::require_all("cloud", &[("domain", true), ("port", true)]).is_ok());
    }
}
