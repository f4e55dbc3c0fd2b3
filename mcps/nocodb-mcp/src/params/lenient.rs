//! Lenient deserializers for arguments agents often send loosely typed
//!
//! NocoDB row IDs are integers while most metadata IDs are strings, and
//! paging values arrive as either numbers or numeric strings. Both shapes are
//! accepted and normalized before the request is built.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(Number),
}

/// An identifier given as a string or a number, kept as its text form
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer) {
        Ok(StringOrNumber::String(s)) => Ok(s),
        Ok(StringOrNumber::Number(n)) => Ok(n.to_string()),
        Err(_) => Err(D::Error::custom("expected a string or number identifier")),
    }
}

/// Optional page size or offset given as a number or a numeric string
pub fn page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<StringOrNumber>::deserialize(deserializer) {
        Ok(value) => value,
        Err(_) => return Err(D::Error::custom("expected a non-negative integer")),
    };

    match value {
        None => Ok(None),
        Some(StringOrNumber::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, got {}", n))),
        Some(StringOrNumber::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a non-negative integer, got \"{}\"", s))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "super::id")]
        record_id: String,
        #[serde(default, deserialize_with = "super::page")]
        limit: Option<u32>,
    }

    fn sample(value: serde_json::Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn identifiers_accept_strings_and_numbers() {
        assert_eq!(sample(json!({"record_id": "rec_1"})).unwrap().record_id, "rec_1");
        assert_eq!(sample(json!({"record_id": 5})).unwrap().record_id, "5");
        assert!(sample(json!({"record_id": ["5"]})).is_err());
    }

    #[test]
    fn page_values_accept_numeric_strings() {
        assert_eq!(sample(json!({"record_id": 1})).unwrap().limit, None);
        assert_eq!(sample(json!({"record_id": 1, "limit": null})).unwrap().limit, None);
        assert_eq!(sample(json!({"record_id": 1, "limit": 10})).unwrap().limit, Some(10));
        assert_eq!(sample(json!({"record_id": 1, "limit": " 10 "})).unwrap().limit, Some(10));
    }

    #[test]
    fn page_values_reject_negatives_and_words() {
        assert!(sample(json!({"record_id": 1, "limit": -1})).is_err());
        assert!(sample(json!({"record_id": 1, "limit": 2.5})).is_err());
        assert!(sample(json!({"record_id": 1, "limit": "ten"})).is_err());
    }
}
