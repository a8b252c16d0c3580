//! In-memory ordering of the payment list

use crate::format::parse_amount;
use crate::query::{SortKey, SortOrder};
use crate::time::timestamp_millis;
use chrono::FixedOffset;
use payweb_client::Payment;
use std::cmp::Ordering;

/// Comparable value extracted once per payment
#[derive(Debug)]
enum SortValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Time(Option<i64>),
}

impl<'a> SortValue<'a> {
    fn of(payment: &'a Payment, key: &SortKey, local: FixedOffset) -> Self {
        match key {
            SortKey::PaymentCode => SortValue::Text(&payment.payment_code),
            SortKey::MchtCode => SortValue::Text(&payment.mcht_code),
            SortKey::PayType => SortValue::Text(&payment.pay_type),
            SortKey::Status => SortValue::Text(&payment.status),
            SortKey::Amount => SortValue::Number(parse_amount(&payment.amount)),
            SortKey::PaymentAt | SortKey::Other(_) => {
                SortValue::Time(timestamp_millis(&payment.payment_at, local))
            }
        }
    }

    fn compare(&self, other: &Self, order: SortOrder) -> Ordering {
        match (self, other) {
            // UTF-16 code unit order
            (SortValue::Text(a), SortValue::Text(b)) => order.apply(a.encode_utf16().cmp(b.encode_utf16())),
            (SortValue::Number(a), SortValue::Number(b)) => {
                compare_parsed(*a, *b, order, |x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal))
            }
            (SortValue::Time(a), SortValue::Time(b)) => compare_parsed(*a, *b, order, |x, y| x.cmp(y)),
            _ => Ordering::Equal,
        }
    }
}

/// Valid values follow `order`; unparseable ones trail in either direction
fn compare_parsed<T>(a: Option<T>, b: Option<T>, order: SortOrder, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => order.apply(cmp(&a, &b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorted copy of `payments`. Stable: equal keys keep their input order.
pub fn sort_payments(payments: &[Payment], key: &SortKey, order: SortOrder, local: FixedOffset) -> Vec<Payment> {
    let mut keyed: Vec<(SortValue<'_>, &Payment)> = payments
        .iter()
        .map(|p| (SortValue::of(p, key, local), p))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.compare(b, order));
    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}
