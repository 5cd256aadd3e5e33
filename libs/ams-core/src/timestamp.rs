//! RFC 3339 timestamps as used on the wire.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Formats a timestamp the way it is written on the wire.
///
/// # Errors
/// Fails for timestamps RFC 3339 can't represent (years outside 0..=9999).
pub fn format(value: OffsetDateTime) -> Result<String, time::error::Format> {
    value.format(&Rfc3339)
}

/// Parses a wire timestamp.
///
/// # Errors
/// Fails when `text` isn't a valid RFC 3339 date-time.
pub fn parse(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text, &Rfc3339)
}

/// Serde adapter for `Option<OffsetDateTime>` fields of generated wire structs.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    /// # Errors
    /// Fails when the timestamp can't be formatted.
    #[allow(clippy::ref_option)] // serde requires &T signature
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => {
                let text = super::format(*value).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    /// Fails when the value isn't a string holding an RFC 3339 date-time.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::parse(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_and_parses_utc() {
        let value = datetime!(2019-04-03 10:20:30 UTC);
        let text = format(value).unwrap();
        assert_eq!(text, "2019-04-03T10:20:30Z");
        assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn keeps_offsets() {
        let value = parse("2019-04-03T12:20:30+02:00").unwrap();
        assert_eq!(value, datetime!(2019-04-03 10:20:30 UTC));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse("2019-04-03").is_err());
    }
}
