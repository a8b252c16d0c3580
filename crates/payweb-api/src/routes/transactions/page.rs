//! Transactions page rendering
//!
//! Endpoints:
//! - page_transactions: Main transactions list page (full page or HTMX partial)
//!
//! Helper functions:
//! - render_content: Title, summary card, table and pagination
//! - render_table: Sortable header plus one row per transaction
//! - render_pagination: Previous / next controls

use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use payweb_core::format::format_count;
use payweb_core::{RawQuery, SortKey, SortOrder, TransactionRow, TransactionsPage, ViewQuery};
use payweb_utils::escape_html;
use std::collections::HashMap;

const EMPTY_MESSAGE: &str = "거래 내역이 없습니다.";

/// Transactions page - sortable table, 15 rows per page
pub async fn page_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let partial = crate::is_htmx_request(&headers);
    let query = ViewQuery::from_raw(&RawQuery::from_params(&params));

    let page = state
        .service
        .page(&query)
        .await
        .map_err(|error| ApiError::Page { error, partial })?;

    let content = render_content(&page);
    Ok(Html(crate::page_response(&headers, "거래 내역", "/transactions", &content)))
}

/// Everything inside the swappable `#transactions-content` block
pub fn render_content(page: &TransactionsPage) -> String {
    let view = page.view();

    format!(
        r#"<div id='transactions-content' hx-boost='true' hx-target='#transactions-content' hx-swap='outerHTML'>
    <div class='flex items-center justify-between mb-4'>
        <div>
            <h2 class='text-2xl font-bold'>거래 내역</h2>
            <p class='text-sm text-gray-500'>결제 내역을 조회하고 정렬할 수 있습니다.</p>
        </div>
    </div>
    <div class='grid grid-cols-2 md:grid-cols-4 gap-3 mb-4'>
        <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>총 거래 건수</p><p class='text-xl font-bold'>{}</p></div>
    </div>
    <p class='text-xs text-gray-500 mb-2'>{}</p>
    <div class='bg-white rounded-xl shadow-sm overflow-x-auto'>
        {}
    </div>
    {}
</div>"#,
        format_count(page.total_items),
        sort_hint(&view),
        render_table(&view, &page.rows),
        render_pagination(page, &view),
    )
}

fn sort_hint(view: &ViewQuery) -> String {
    let direction = match view.order {
        SortOrder::Asc => "오름차순",
        SortOrder::Desc => "내림차순",
    };
    format!(
        "정렬: {} {} · 열 제목을 눌러 정렬 방향을 바꿀 수 있습니다.",
        escape_html(view.sort_by.label()),
        direction
    )
}

/// Table with sortable headers; an empty list gets a single placeholder row
pub fn render_table(view: &ViewQuery, rows: &[TransactionRow]) -> String {
    let headers: String = SortKey::COLUMNS
        .iter()
        .map(|key| {
            let arrow = if &view.sort_by == key { view.order.arrow() } else { "" };
            format!(
                "<th class='px-4 py-3 text-left'><a href='{}' class='hover:text-indigo-600'>{}{}</a></th>",
                escape_html(&view.sort_href(key)),
                escape_html(key.label()),
                arrow
            )
        })
        .collect();

    let body = if rows.is_empty() {
        format!(
            "<tr><td colspan='{}' class='px-4 py-8 text-center text-gray-500'>{}</td></tr>",
            SortKey::COLUMNS.len(),
            EMPTY_MESSAGE
        )
    } else {
        rows.iter().map(render_row).collect()
    };

    format!(
        r#"<table class='min-w-full text-sm'>
            <thead class='bg-gray-50 text-gray-600'><tr>{}</tr></thead>
            <tbody class='divide-y'>{}</tbody>
        </table>"#,
        headers, body
    )
}

fn render_row(row: &TransactionRow) -> String {
    format!(
        r#"<tr class='hover:bg-gray-50'>
                <td class='px-4 py-2 font-mono'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2 text-right'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2 text-gray-500'>{}</td>
            </tr>"#,
        escape_html(&row.payment_code),
        escape_html(&row.mcht_code),
        escape_html(&row.amount_display),
        escape_html(&row.pay_type_label),
        escape_html(&row.status_label),
        escape_html(&row.payment_at_display),
    )
}

/// Previous / next links keeping the current sort
pub fn render_pagination(page: &TransactionsPage, view: &ViewQuery) -> String {
    let prev = page_link("이전", page.has_prev.then(|| view.page_href(page.page - 1)));
    let next = page_link("다음", page.has_next.then(|| view.page_href(page.page + 1)));

    format!(
        r#"<div class='flex items-center justify-between mt-4'>
        <span class='text-sm text-gray-500'>페이지 {} / {} (총 {}건)</span>
        <div class='flex items-center gap-2'>{}{}</div>
    </div>"#,
        page.page,
        page.total_pages,
        payweb_utils::format_number(page.total_items),
        prev,
        next
    )
}

fn page_link(label: &str, href: Option<String>) -> String {
    match href {
        Some(href) => format!(
            "<a href='{}' class='px-3 py-1 border rounded hover:bg-gray-100'>{}</a>",
            escape_html(&href),
            label
        ),
        None => format!(
            "<a href='#' aria-disabled='true' class='px-3 py-1 border rounded text-gray-300 pointer-events-none'>{}</a>",
            label
        ),
    }
}
