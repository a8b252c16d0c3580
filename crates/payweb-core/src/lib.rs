//! Transaction view logic
//!
//! Turns the upstream payment list into one sorted, paginated, labelled
//! page:
//! - query: page / sortBy / order normalization
//! - sort: ordering of the full list
//! - paginate: fixed 15-row windows
//! - catalog: status and pay type descriptions
//! - format, time: amount and timestamp display

pub mod catalog;
pub mod error;
pub mod format;
pub mod paginate;
pub mod query;
pub mod sort;
pub mod time;

use chrono::FixedOffset;
use payweb_client::{fetch_snapshot, Payment, Snapshot, SourceRef};
use payweb_config::Config;
use serde::Serialize;

pub use catalog::Catalogs;
pub use error::{CoreError, CoreResult, ErrorCode, FETCH_FAILED_MESSAGE};
pub use paginate::{paginate, PageWindow, PAGE_SIZE};
pub use query::{RawQuery, SortKey, SortOrder, ViewQuery};

/// One table row, codes already resolved to labels
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub payment_code: String,
    pub mcht_code: String,
    pub amount: String,
    pub amount_display: String,
    pub currency: String,
    pub pay_type: String,
    pub pay_type_label: String,
    pub status: String,
    pub status_label: String,
    pub payment_at: String,
    pub payment_at_display: String,
}

impl TransactionRow {
    fn new(payment: Payment, catalogs: &Catalogs, local: FixedOffset) -> Self {
        let pay_type_label = catalogs.pay_type_label(&payment.pay_type).to_string();
        let status_label = catalogs.status_label(&payment.status).to_string();
        let amount_display = format::format_amount(&payment.amount, &payment.currency);
        let payment_at_display = time::display_timestamp(&payment.payment_at, local);

        Self {
            payment_code: payment.payment_code,
            mcht_code: payment.mcht_code,
            amount: payment.amount,
            amount_display,
            currency: payment.currency,
            pay_type: payment.pay_type,
            pay_type_label,
            status: payment.status,
            status_label,
            payment_at: payment.payment_at,
            payment_at_display,
        }
    }
}

/// Everything the transactions page shows
#[derive(Debug, Clone, Serialize)]
pub struct TransactionsPage {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub rows: Vec<TransactionRow>,
}

impl TransactionsPage {
    /// View state the page was rendered with, page clamped
    pub fn view(&self) -> ViewQuery {
        ViewQuery {
            page: self.page,
            sort_by: self.sort_by.clone(),
            order: self.order,
        }
    }
}

/// Sort, paginate and label an already fetched snapshot
pub fn build_page(snapshot: Snapshot, query: &ViewQuery, local: FixedOffset) -> TransactionsPage {
    let catalogs = Catalogs::new(&snapshot.statuses, &snapshot.pay_types);
    let sorted = sort::sort_payments(&snapshot.payments, &query.sort_by, query.order, local);
    let window = paginate(sorted, query.page);

    TransactionsPage {
        page: window.page,
        total_pages: window.total_pages,
        total_items: window.total_items,
        has_prev: window.has_prev,
        has_next: window.has_next,
        sort_by: query.sort_by.clone(),
        order: query.order,
        rows: window
            .items
            .into_iter()
            .map(|p| TransactionRow::new(p, &catalogs, local))
            .collect(),
    }
}

/// Builds transaction pages from a payment source
pub struct TransactionsService {
    source: SourceRef,
    local: FixedOffset,
}

impl TransactionsService {
    pub fn new(config: &Config, source: SourceRef) -> Self {
        Self {
            source,
            local: time::offset_from_minutes(config.display.utc_offset_minutes),
        }
    }

    /// Fetch fresh data and build the requested page.
    ///
    /// Fails as a whole when any upstream request fails.
    pub async fn page(&self, query: &ViewQuery) -> CoreResult<TransactionsPage> {
        let snapshot = fetch_snapshot(self.source.as_ref()).await.map_err(|e| {
            log::error!("[{}] {}", ErrorCode::UpstreamFetchFailed, e);
            CoreError::from(e)
        })?;

        log::debug!(
            "Fetched {} payments, {} statuses, {} pay types",
            snapshot.payments.len(),
            snapshot.statuses.len(),
            snapshot.pay_types.len()
        );

        Ok(build_page(snapshot, query, self.local))
    }
}
