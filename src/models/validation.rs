use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use mongodb::bson::{self, oid::ObjectId};
use thiserror::Error;

/// Failure produced while turning a request body into a typed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or empty. Rendered as `{message}`.
    #[error("{0}")]
    Missing(&'static str),

    /// A field is present but cannot be accepted. Rendered as `{error}`.
    #[error("{entity} validation failed: {field}: {reason}")]
    Field {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    pub fn field(entity: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Field {
            entity,
            field,
            reason: reason.into(),
        }
    }
}

/// Treats `None` and empty strings alike, matching how required fields are checked.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn parse_object_id(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<ObjectId, ValidationError> {
    ObjectId::parse_str(value).map_err(|_| {
        ValidationError::field(entity, field, format!("`{}` is not a valid ObjectId", value))
    })
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<bson::DateTime, ValidationError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(bson::DateTime::from_millis(parsed.timestamp_millis()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| bson::DateTime::from_millis(midnight.and_utc().timestamp_millis()))
        .ok_or_else(|| ValidationError::field(entity, field, format!("`{}` is not a valid date", value)))
}

/// Renders a stored date the way JSON clients expect it: `2025-06-01T00:00:00.000Z`.
pub fn format_date(value: bson::DateTime) -> String {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn present_rejects_empty_strings() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("Paris".into())), Some("Paris"));
    }

    #[rstest]
    #[case("2025-06-01", "2025-06-01T00:00:00.000Z")]
    #[case("2025-06-01T12:30:00Z", "2025-06-01T12:30:00.000Z")]
    #[case("2025-06-01T12:30:00+02:00", "2025-06-01T10:30:00.000Z")]
    fn dates_are_normalized_to_utc(#[case] input: &str, #[case] expected: &str) {
        let parsed = parse_date("Trip", "startDate", input).unwrap();
        assert_eq!(format_date(parsed), expected);
    }

    #[test]
    fn garbage_dates_name_the_field() {
        let err = parse_date("Trip", "endDate", "next tuesday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Trip validation failed: endDate: `next tuesday` is not a valid date"
        );
    }

    #[test]
    fn object_ids_must_be_24_hex_chars() {
        assert!(parse_object_id("Trip", "userId", "65f1c0ffee0000000000abcd").is_ok());
        assert!(parse_object_id("Trip", "userId", "not-an-id").is_err());
    }
}
