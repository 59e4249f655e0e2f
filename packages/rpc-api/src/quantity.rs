//! Integer quantities as nodes put them on the wire.
//!
//! Balances and nonces arrive as JSON numbers, decimal strings (`"1000"`),
//! or `0x`-prefixed hex strings depending on the node. `null` reads as zero.
//! Outgoing quantities are always decimal strings.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Parse a decimal or `0x` hex quantity string.
pub fn parse_u128(s: &str) -> Result<u128, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some("") => Ok(0),
        Some(hex) => u128::from_str_radix(hex, 16),
        None => s.parse::<u128>(),
    };
    parsed.map_err(|e| format!("invalid quantity {s:?}: {e}"))
}

/// Accepts a JSON number of any width, a decimal or hex string, or `null`.
pub fn deserialize_u128<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    // `arbitrary_precision` keeps integer literals beyond u64 exact.
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => parse_u128(&n.to_string()).map_err(serde::de::Error::custom),
        Value::String(s) => parse_u128(&s).map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "invalid quantity {other}: expected a number or string"
        ))),
    }
}

pub fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let wide = deserialize_u128(deserializer)?;
    u64::try_from(wide).map_err(|_| serde::de::Error::custom(format!("quantity {wide} overflows u64")))
}

pub fn serialize_decimal<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: std::fmt::Display,
{
    serializer.collect_str(value)
}
