//! Typed access to query string parameters.

use time::OffsetDateTime;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("expected at most one value for parameter '{name}' but got {count}")]
    TooManyValues { name: String, count: usize },
    #[error(
        "value '{value}' isn't valid for the '{name}' parameter \
         because it isn't {expected}: {reason}"
    )]
    Invalid {
        name: String,
        value: String,
        expected: &'static str,
        reason: String,
    },
}

/// Decoded query string.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Decodes a raw query string (without the leading `?`).
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|raw| {
                url::form_urlencoded::parse(raw.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    /// The single value of `name`, `None` when absent.
    fn single(&self, name: &str) -> Result<Option<&str>, QueryError> {
        let mut values = self
            .pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str());
        let first = values.next();
        let rest = values.count();
        if rest > 0 {
            return Err(QueryError::TooManyValues {
                name: name.to_owned(),
                count: rest + 1,
            });
        }
        Ok(first)
    }

    fn parse_with<T, E: std::fmt::Display>(
        &self,
        name: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<Option<T>, QueryError> {
        let Some(value) = self.single(name)? else {
            return Ok(None);
        };
        parse(value).map(Some).map_err(|e| QueryError::Invalid {
            name: name.to_owned(),
            value: value.to_owned(),
            expected,
            reason: e.to_string(),
        })
    }

    /// # Errors
    /// Fails when the parameter is repeated.
    pub fn parse_string(&self, name: &str) -> Result<Option<String>, QueryError> {
        Ok(self.single(name)?.map(str::to_owned))
    }

    /// # Errors
    /// Fails when the parameter is repeated or isn't an integer.
    pub fn parse_integer(&self, name: &str) -> Result<Option<i64>, QueryError> {
        self.parse_with(name, "an integer", str::parse::<i64>)
    }

    /// # Errors
    /// Fails when the parameter is repeated or isn't a number.
    pub fn parse_float(&self, name: &str) -> Result<Option<f64>, QueryError> {
        self.parse_with(name, "a floating point number", str::parse::<f64>)
    }

    /// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
    ///
    /// # Errors
    /// Fails when the parameter is repeated or isn't a boolean.
    pub fn parse_boolean(&self, name: &str) -> Result<Option<bool>, QueryError> {
        self.parse_with(name, "a boolean", |value| match value {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err("invalid syntax"),
        })
    }

    /// # Errors
    /// Fails when the parameter is repeated or isn't an RFC 3339 date-time.
    pub fn parse_date(&self, name: &str) -> Result<Option<OffsetDateTime>, QueryError> {
        self.parse_with(name, "a valid date", crate::timestamp::parse)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn absent_parameters_are_none() {
        let query = Query::parse(None);
        assert_eq!(query.parse_integer("page").unwrap(), None);
        assert_eq!(query.parse_string("search").unwrap(), None);
    }

    #[test]
    fn parses_typed_values() {
        let query = Query::parse(Some(
            "page=2&search=name+like+%27a%25%27&ratio=0.5&total=true&since=2020-01-02T03:04:05Z",
        ));
        assert_eq!(query.parse_integer("page").unwrap(), Some(2));
        assert_eq!(
            query.parse_string("search").unwrap().as_deref(),
            Some("name like 'a%'")
        );
        assert_eq!(query.parse_float("ratio").unwrap(), Some(0.5));
        assert_eq!(query.parse_boolean("total").unwrap(), Some(true));
        assert_eq!(
            query.parse_date("since").unwrap(),
            Some(datetime!(2020-01-02 03:04:05 UTC))
        );
    }

    #[test]
    fn rejects_repeated_parameters() {
        let query = Query::parse(Some("size=1&size=2&size=3"));
        let err = query.parse_integer("size").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected at most one value for parameter 'size' but got 3"
        );
    }

    #[test]
    fn rejects_non_integers() {
        let query = Query::parse(Some("page=two"));
        let err = query.parse_integer("page").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("value 'two' isn't valid for the 'page' parameter"));
        assert!(
            message.contains("because it isn't an integer: "),
            "{message}"
        );
    }

    #[test]
    fn rejects_unknown_booleans() {
        let query = Query::parse(Some("total=yes"));
        assert!(matches!(
            query.parse_boolean("total"),
            Err(QueryError::Invalid {
                expected: "a boolean",
                ..
            })
        ));
    }
}
