//! Data model for one search stream.
//!
//! [`SearchQuery`] and [`Cursor`] live for the whole stream. [`SearchPage`]
//! and [`SearchItem`] are produced and dropped within a single poll cycle.

mod query;
mod search;

pub use query::{Cursor, SearchQuery, StreamParams};
pub use search::{SearchItem, SearchOutcome, SearchPage, CREATED_AT_FORMAT};

use serde::{Deserialize, Deserializer};

/// Helper to deserialize id as either string or integer
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Same as [`deserialize_id`] for optional ids.
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_id")] String);

    let value: Option<Wrapper> = Option::deserialize(deserializer)?;
    Ok(value.map(|Wrapper(id)| id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        newest: Option<String>,
    }

    #[test]
    fn test_deserialize_id_accepts_string_and_integer() {
        let a: Record = serde_json::from_str(r#"{"id": "1460323737035677698"}"#).unwrap();
        let b: Record = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(a.id, "1460323737035677698");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn test_deserialize_optional_id() {
        let absent: Record = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        let null: Record = serde_json::from_str(r#"{"id": "1", "newest": null}"#).unwrap();
        let present: Record = serde_json::from_str(r#"{"id": "1", "newest": 500}"#).unwrap();
        assert_eq!(absent.newest, None);
        assert_eq!(null.newest, None);
        assert_eq!(present.newest.as_deref(), Some("500"));
    }
}
