//! Wire types of the upstream payments API

use serde::{Deserialize, Deserializer, Serialize};

/// `{status, message, data}` wrapper returned by every upstream endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T: Default> Envelope<T> {
    /// The payload, or an empty one when the upstream sent none
    pub fn into_data(self) -> T {
        self.data.unwrap_or_default()
    }
}

/// A single payment transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    pub payment_code: String,
    pub mcht_code: String,
    /// Decimal amount as sent by the upstream
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub currency: String,
    pub pay_type: String,
    pub status: String,
    pub payment_at: String,
}

/// Payment status catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeItem {
    pub code: String,
    pub description: String,
}

/// Pay type catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayTypeItem {
    #[serde(rename = "type")]
    pub pay_type: String,
    pub description: String,
}

/// Amounts are documented as strings, but accept bare JSON numbers too
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("expected string or number, got {}", other))),
    }
}
