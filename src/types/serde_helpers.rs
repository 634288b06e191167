//! Custom serde helpers for Khipu's loosely typed JSON.
//!
//! Khipu returns empty strings for absent values and has sent identifiers
//! both as numbers and as strings over time. These modules normalize that.

use std::fmt;

use serde::{Deserialize, Deserializer, de};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Deserialize an empty or null string as `None`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use khipu_api_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Payment {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     bank: Option<String>,
/// }
///
/// let payment: Payment = serde_json::from_str(r#"{"bank":""}"#).unwrap();
/// assert!(payment.bank.is_none());
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, mapping `""` and `null` to `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        Ok(opt.filter(|s| !s.is_empty()))
    }
}

/// Deserialize an optional RFC 3339 timestamp, treating `""` and `null` as `None`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use time::OffsetDateTime;
/// use khipu_api_client::types::serde_helpers::optional_rfc3339;
///
/// #[derive(Deserialize, Debug)]
/// struct Payment {
///     #[serde(deserialize_with = "optional_rfc3339::deserialize", default)]
///     conciliation_date: Option<OffsetDateTime>,
/// }
///
/// let json = r#"{"conciliation_date":"2017-03-01T13:00:00.000Z"}"#;
/// let payment: Payment = serde_json::from_str(json).unwrap();
/// assert_eq!(payment.conciliation_date.unwrap().year(), 2017);
/// ```
pub mod optional_rfc3339 {
    use super::*;

    /// Deserialize an optional timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => OffsetDateTime::parse(&s, &Rfc3339)
                .map(Some)
                .map_err(de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Deserialize an unsigned identifier sent either as a number or a string.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use khipu_api_client::types::serde_helpers::number_or_string;
///
/// #[derive(Deserialize, Debug)]
/// struct Receiver {
///     #[serde(deserialize_with = "number_or_string::deserialize")]
///     receiver_id: u64,
/// }
///
/// let a: Receiver = serde_json::from_str(r#"{"receiver_id":1234}"#).unwrap();
/// let b: Receiver = serde_json::from_str(r#"{"receiver_id":"1234"}"#).unwrap();
/// assert_eq!(a.receiver_id, b.receiver_id);
/// ```
pub mod number_or_string {
    use super::*;

    /// Deserialize a `u64` from a JSON number or a numeric string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberOrStringVisitor;

        impl<'de> de::Visitor<'de> for NumberOrStringVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an unsigned integer or a numeric string")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v).map_err(de::Error::custom)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.trim().parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(NumberOrStringVisitor)
    }
}
