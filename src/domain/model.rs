use crate::utils::error::DeskError;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Taxpayer identifier: a non-negative integer of unbounded precision.
///
/// Held as canonical decimal digits (no leading zeros) so values past
/// `u64::MAX` keep every digit through the wire and onto the screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxPayerId(String);

impl TaxPayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }
}

impl FromStr for TaxPayerId {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(DeskError::InvalidIdentifier {
                value: s.to_string(),
                reason: "identifier is empty".to_string(),
            });
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeskError::InvalidIdentifier {
                value: s.to_string(),
                reason: "only the digits 0-9 are allowed".to_string(),
            });
        }
        Ok(Self::from_digits(value))
    }
}

impl From<u64> for TaxPayerId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for TaxPayerId {
    fn from(value: u128) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaxPayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Canonical digits compare numerically by length first.
impl Ord for TaxPayerId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TaxPayerId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for TaxPayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

const EXPECTING: &str = "a non-negative integer or a string of decimal digits";

// serde_json is built with `arbitrary_precision`, so a numeric `tid` keeps its
// literal text in `Number` and no digit is lost to an f64 detour.
impl<'de> Deserialize<'de> for TaxPayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            Value::String(s) => s
                .parse()
                .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &EXPECTING)),
            Value::Number(n) => {
                let literal = n.to_string();
                literal.parse().map_err(|_| {
                    de::Error::invalid_value(Unexpected::Other(&literal), &EXPECTING)
                })
            }
            Value::Bool(b) => Err(de::Error::invalid_type(Unexpected::Bool(b), &EXPECTING)),
            Value::Null => Err(de::Error::invalid_type(Unexpected::Unit, &EXPECTING)),
            Value::Array(_) => Err(de::Error::invalid_type(Unexpected::Seq, &EXPECTING)),
            Value::Object(_) => Err(de::Error::invalid_type(Unexpected::Map, &EXPECTING)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPayerRecord {
    pub tid: TaxPayerId,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl TaxPayerRecord {
    pub fn new(
        tid: TaxPayerId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            tid,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
        }
    }
}
