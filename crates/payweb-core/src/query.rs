//! Request view state: page number, sort column and direction

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Query string exactly as received
#[derive(Debug, Clone, Default)]
pub struct RawQuery {
    pub page: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl RawQuery {
    /// Pick `page`, `sortBy` and `order` out of decoded query parameters
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            page: params.get("page").cloned(),
            sort_by: params.get("sortBy").cloned(),
            order: params.get("order").cloned(),
        }
    }
}

/// Sort column
///
/// Unknown values are kept verbatim in `Other` so they survive into
/// pagination links; they sort like `PaymentAt`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortKey {
    PaymentCode,
    MchtCode,
    Amount,
    PayType,
    Status,
    #[default]
    PaymentAt,
    Other(String),
}

impl SortKey {
    /// Table columns in display order
    pub const COLUMNS: [SortKey; 6] = [
        SortKey::PaymentCode,
        SortKey::MchtCode,
        SortKey::Amount,
        SortKey::PayType,
        SortKey::Status,
        SortKey::PaymentAt,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "paymentCode" => SortKey::PaymentCode,
            "mchtCode" => SortKey::MchtCode,
            "amount" => SortKey::Amount,
            "payType" => SortKey::PayType,
            "status" => SortKey::Status,
            "paymentAt" => SortKey::PaymentAt,
            other => SortKey::Other(other.to_string()),
        }
    }

    /// Query string value
    pub fn as_str(&self) -> &str {
        match self {
            SortKey::PaymentCode => "paymentCode",
            SortKey::MchtCode => "mchtCode",
            SortKey::Amount => "amount",
            SortKey::PayType => "payType",
            SortKey::Status => "status",
            SortKey::PaymentAt => "paymentAt",
            SortKey::Other(raw) => raw,
        }
    }

    /// Column header text
    pub fn label(&self) -> &str {
        match self {
            SortKey::PaymentCode => "결제 코드",
            SortKey::MchtCode => "가맹점 코드",
            SortKey::Amount => "금액",
            SortKey::PayType => "결제 수단",
            SortKey::Status => "상태",
            SortKey::PaymentAt | SortKey::Other(_) => "결제 시각",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only the literal `asc` sorts ascending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Orient an ascending comparison
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Header arrow for the active column
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => " ▲",
            SortOrder::Desc => " ▼",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized view state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewQuery {
    /// Requested page, at least 1 (not yet clamped to the page count)
    pub page: usize,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            page: 1,
            sort_by: SortKey::PaymentAt,
            order: SortOrder::Desc,
        }
    }
}

impl ViewQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            page: parse_page(raw.page.as_deref()),
            sort_by: raw
                .sort_by
                .as_deref()
                .map(SortKey::parse)
                .unwrap_or_default(),
            order: SortOrder::parse(raw.order.as_deref()),
        }
    }

    /// Order a header link for `key` requests: ascending on first click,
    /// flipped when `key` is already the ascending sort column
    pub fn next_order_for(&self, key: &SortKey) -> SortOrder {
        if &self.sort_by == key && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    /// `/transactions` link to `page`, keeping the current sort
    pub fn page_href(&self, page: usize) -> String {
        format!(
            "/transactions?page={}&sortBy={}&order={}",
            page,
            urlencoding::encode(self.sort_by.as_str()),
            self.order
        )
    }

    /// `/transactions` link that sorts by `key`, starting again from page 1
    pub fn sort_href(&self, key: &SortKey) -> String {
        format!(
            "/transactions?page=1&sortBy={}&order={}",
            urlencoding::encode(key.as_str()),
            self.next_order_for(key)
        )
    }
}

/// Parse the `page` parameter.
///
/// Numeric strings are accepted with surrounding whitespace and fractions
/// are floored; unsigned `0x`/`0o`/`0b` integers are read in their radix.
/// Absent means 1, blank counts as 0. Anything below 1 or not a number
/// falls back to 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    let value = match raw {
        None => 1.0,
        Some(s) => parse_number(s.trim()),
    };

    if value.is_nan() || value < 1.0 {
        1
    } else {
        // saturates for huge values; the paginator clamps afterwards
        value.floor() as usize
    }
}

/// Numeric value of a query string, NaN when it is not a number
fn parse_number(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }
    if let Some(value) = parse_prefixed_integer(s) {
        return value;
    }

    // f64 also takes `inf` / `nan` spellings; only `Infinity` counts here
    let unsigned = s.trim_start_matches(['+', '-']);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x1F`, `0o17`, `0b101`; a sign or an empty digit run is not accepted
fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    Some(
        digits
            .chars()
            .try_fold(0.0, |acc: f64, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
            .unwrap_or(f64::NAN),
    )
}
