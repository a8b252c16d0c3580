//! Code → description lookups for payment status and pay type

use payweb_client::{CodeItem, PayTypeItem};
use std::collections::HashMap;

/// Both lookup catalogs, built once per page view
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    statuses: HashMap<String, String>,
    pay_types: HashMap<String, String>,
}

impl Catalogs {
    /// Later entries win when a code repeats
    pub fn new(statuses: &[CodeItem], pay_types: &[PayTypeItem]) -> Self {
        Self {
            statuses: statuses
                .iter()
                .map(|s| (s.code.clone(), s.description.clone()))
                .collect(),
            pay_types: pay_types
                .iter()
                .map(|t| (t.pay_type.clone(), t.description.clone()))
                .collect(),
        }
    }

    /// Status description, or the code itself when unknown
    pub fn status_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.statuses.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Pay type description, or the code itself when unknown
    pub fn pay_type_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.pay_types.get(code).map(String::as_str).unwrap_or(code)
    }
}
