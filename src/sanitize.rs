//! Form input sanitization and shared field validators

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use validator::ValidationError;

/// Longest first or family name the catalog stores
pub const MAX_NAME_LENGTH: usize = 100;

const ENTITIES: [(char, &str); 8] = [
    ('&', "&amp;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('/', "&#x2F;"),
    ('\\', "&#x5C;"),
    ('`', "&#96;"),
];

/// Replace characters that are unsafe inside HTML with their entities.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match ENTITIES.iter().find(|(unsafe_char, _)| *unsafe_char == c) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape`]: `unescape(&escape(s)) == s`. Only the entities
/// produced by `escape` are decoded.
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(_, entity)| rest.starts_with(entity)) {
            Some((c, entity)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Trim surrounding whitespace then escape.
pub fn trim_escape(input: &str) -> String {
    escape(input.trim())
}

/// Parse an ISO-8601 calendar date (`2024-03-01`) or date-time
/// (`2024-03-01T10:00:00Z`), keeping only the date part. Reduced precision
/// forms (`2024`, `2024-03`) resolve to the first day of the year or month.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| parse_reduced_date(input))
}

/// `YYYY` or `YYYY-MM`
fn parse_reduced_date(input: &str) -> Option<NaiveDate> {
    let (year, month) = match input.split_once('-') {
        Some((year, month)) if month.len() == 2 => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (input, 1),
    };
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Blank input counts as "not provided".
pub fn optional_iso_date(input: &str) -> Option<NaiveDate> {
    if input.trim().is_empty() {
        None
    } else {
        parse_iso_date(input)
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn first_name_alphanumeric(value: &str) -> Result<(), ValidationError> {
    name_chars(
        value,
        "First name includes non-alpha characters",
        "First name must be at most 100 characters",
    )
}

pub(crate) fn family_name_alphanumeric(value: &str) -> Result<(), ValidationError> {
    name_chars(
        value,
        "Family name includes non-alpha characters",
        "Family name must be at most 100 characters",
    )
}

fn name_chars(
    value: &str,
    alphanumeric: &'static str,
    too_long: &'static str,
) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Err(error("alphanumeric", alphanumeric))
    } else if value.len() > MAX_NAME_LENGTH {
        Err(error("max_length", too_long))
    } else {
        Ok(())
    }
}

pub(crate) fn date_of_birth_iso(value: &str) -> Result<(), ValidationError> {
    optional_date(value, "Invalid date of birth")
}

pub(crate) fn date_of_death_iso(value: &str) -> Result<(), ValidationError> {
    optional_date(value, "Invalid date of death")
}

pub(crate) fn due_back_iso(value: &str) -> Result<(), ValidationError> {
    optional_date(value, "Invalid date")
}

fn optional_date(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_iso_date(value).is_some() {
        Ok(())
    } else {
        Err(error("iso8601", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;&#x2F;b&gt;");
        assert_eq!(escape("it's `ok`"), "it&#x27;s &#96;ok&#96;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        for input in ["Tor & Co", "<b>\"x\"</b>", "a\\b `c` d'e", "&amp; typed literally", "plain"] {
            assert_eq!(unescape(&escape(input)), input);
        }
        assert_eq!(unescape("Tor &amp; Co"), "Tor & Co");
        assert_eq!(unescape("&nbsp;&"), "&nbsp;&");
    }

    #[test]
    fn test_trim_escape() {
        assert_eq!(trim_escape("  Ursula  "), "Ursula");
        assert_eq!(trim_escape(" a<b "), "a&lt;b");
    }

    #[test]
    fn test_parse_iso_date() {
        let d = NaiveDate::from_ymd_opt(1929, 10, 21).unwrap();
        assert_eq!(parse_iso_date("1929-10-21"), Some(d));
        assert_eq!(parse_iso_date("1929-10-21T08:30:00Z"), Some(d));
        assert_eq!(parse_iso_date("1929-10-21T08:30:00"), Some(d));
        assert_eq!(parse_iso_date("21/10/1929"), None);
        assert_eq!(parse_iso_date("1929-02-30"), None);
    }

    #[test]
    fn test_parse_reduced_iso_date() {
        assert_eq!(parse_iso_date("1973"), NaiveDate::from_ymd_opt(1973, 1, 1));
        assert_eq!(parse_iso_date("1973-06"), NaiveDate::from_ymd_opt(1973, 6, 1));
        assert_eq!(parse_iso_date("1973-13"), None);
        assert_eq!(parse_iso_date("1973-6"), None);
        assert_eq!(parse_iso_date("73"), None);
        assert!(date_of_birth_iso("1973-06").is_ok());
    }

    #[test]
    fn test_optional_iso_date() {
        assert_eq!(optional_iso_date(""), None);
        assert_eq!(optional_iso_date("   "), None);
        assert!(optional_iso_date("2020-01-01").is_some());
    }

    #[test]
    fn test_alphanumeric() {
        assert!(first_name_alphanumeric("Ursula2").is_ok());
        assert!(first_name_alphanumeric("").is_err());
        assert!(first_name_alphanumeric("Le Guin").is_err());
        assert!(family_name_alphanumeric("O&#x27;Brien").is_err());
        assert!(family_name_alphanumeric("José").is_err());
    }

    #[test]
    fn test_name_length_limit() {
        assert!(first_name_alphanumeric(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
        let err = family_name_alphanumeric(&"a".repeat(MAX_NAME_LENGTH + 1)).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Family name must be at most 100 characters"));
    }

    #[test]
    fn test_optional_date_messages() {
        assert!(date_of_birth_iso("").is_ok());
        let err = date_of_death_iso("yesterday").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid date of death"));
        assert!(due_back_iso("2024-12-31").is_ok());
    }
}
