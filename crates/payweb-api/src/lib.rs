//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction table, sorting, pagination

pub mod error;
pub mod routes;

use axum::{
    http::HeaderMap,
    response::Redirect,
    routing::get,
    Router,
};
use payweb_config::Config;
use payweb_core::TransactionsService;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TransactionsService>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{api_transactions, page_transactions};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/transactions", get(page_transactions))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn index_page() -> Redirect {
    Redirect::to("/transactions")
}

// ==================== Template Functions ====================

/// Lets htmx swap the upstream-failure box in; by default htmx ignores 5xx bodies
const SWAP_ERROR_SCRIPT: &str = r#"<script>
        document.addEventListener('htmx:beforeSwap', function (evt) {
            if (evt.detail.xhr.status === 502) {
                evt.detail.shouldSwap = true;
                evt.detail.isError = false;
            }
        });
    </script>"#;

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Payweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
    {}
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        payweb_utils::escape_html(title),
        SWAP_ERROR_SCRIPT,
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [("/transactions", "거래 내역", "📋")];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Payweb</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let active_class = if current_path.starts_with(path) {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Sidebar plus main area
pub fn layout(current_path: &str, inner_content: &str) -> String {
    format!(
        r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
        nav_sidebar(current_path),
        inner_content
    )
}

/// Error box shown in place of the transactions content
pub fn error_content(message: &str) -> String {
    format!(
        r#"<div id='transactions-content'>
    <div class='bg-red-50 border border-red-200 text-red-700 rounded-lg p-4' role='alert'>{}</div>
</div>"#,
        payweb_utils::escape_html(message)
    )
}

/// True for htmx swaps. History restores replace the whole body, so they
/// count as full page requests.
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request") && !headers.contains_key("hx-history-restore-request")
}

/// Wrap content for full page or HTMX partial
///
/// HTMX requests swap `#transactions-content` in place, so they get the
/// content alone without sidebar or document shell.
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, &layout(current_path, inner_content))
    }
}

/// Bind and serve until Ctrl-C
pub async fn start_server(config: Config, service: Arc<TransactionsService>) -> Result<(), std::io::Error> {
    let addr = config.bind_addr();
    log::info!("Upstream API: {}", config.base_url());

    let state = AppState { service };
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Payweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /api/transactions (JSON)");
    log::info!("  - /api/health");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use payweb_client::{CodeItem, FetchError, PayTypeItem, Payment, PaymentSource, SourceRef};
    use tower::ServiceExt;

    struct StubSource {
        payments: Vec<Payment>,
        fail: bool,
    }

    #[async_trait]
    impl PaymentSource for StubSource {
        async fn payments(&self) -> Result<Vec<Payment>, FetchError> {
            if self.fail {
                return Err(FetchError::Status {
                    endpoint: payweb_client::PAYMENTS_PATH.to_string(),
                    status: 503,
                });
            }
            Ok(self.payments.clone())
        }

        async fn payment_statuses(&self) -> Result<Vec<CodeItem>, FetchError> {
            Ok(vec![CodeItem {
                code: "SUCCESS".to_string(),
                description: "결제 완료".to_string(),
            }])
        }

        async fn pay_types(&self) -> Result<Vec<PayTypeItem>, FetchError> {
            Ok(vec![PayTypeItem {
                pay_type: "CARD".to_string(),
                description: "카드".to_string(),
            }])
        }
    }

    fn payment(code: &str, amount: &str, at: &str) -> Payment {
        Payment {
            payment_code: code.to_string(),
            mcht_code: "M-1".to_string(),
            amount: amount.to_string(),
            currency: "KRW".to_string(),
            pay_type: "CARD".to_string(),
            status: "SUCCESS".to_string(),
            payment_at: at.to_string(),
        }
    }

    fn app(payments: Vec<Payment>, fail: bool) -> Router {
        let config = Config::default();
        let source: SourceRef = Arc::new(StubSource { payments, fail });
        let service = Arc::new(TransactionsService::new(&config, source));
        create_router(AppState { service })
    }

    async fn get(app: Router, uri: &str, htmx: bool) -> (StatusCode, String) {
        let headers: &[(&str, &str)] = if htmx { &[("HX-Request", "true")] } else { &[] };
        get_with_headers(app, uri, headers).await
    }

    async fn get_with_headers(app: Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, String) {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let res = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_page_renders_rows() {
        let app = app(
            vec![
                payment("PAY-1", "1000", "2025-11-01T10:00:00"),
                payment("<PAY-2>", "2500.5", "2025-11-02T14:05:10"),
            ],
            false,
        );
        let (status, body) = get(app, "/transactions", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("<table"));
        assert!(body.contains("&lt;PAY-2&gt;"));
        assert!(!body.contains("<PAY-2>"));
        assert!(body.contains("2,500.5원"));
        assert!(body.contains("결제 완료"));
        assert!(body.contains("카드"));
        assert!(body.contains("2025. 11. 2. 오후 2:05:10"));
        assert!(body.contains("페이지 1 / 1 (총 2건)"));
        // Newest first by default
        let newer = body.find("&lt;PAY-2&gt;").unwrap();
        let older = body.find("PAY-1").unwrap();
        assert!(newer < older);
    }

    #[tokio::test]
    async fn test_empty_list_shows_placeholder_row() {
        let (status, body) = get(app(vec![], false), "/transactions", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("거래 내역이 없습니다."));
        assert!(body.contains("페이지 1 / 1 (총 0건)"));
        assert!(body.contains("aria-disabled='true'"));
    }

    #[tokio::test]
    async fn test_upstream_failure_renders_error_only() {
        let (status, body) = get(app(vec![], true), "/transactions", false).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("거래 내역 데이터 조회에 실패했습니다."));
        assert!(!body.contains("<table"));
    }

    #[tokio::test]
    async fn test_header_links_toggle_order() {
        let app = app(vec![payment("PAY-1", "1000", "2025-11-01T10:00:00")], false);
        let (_, body) = get(app, "/transactions?sortBy=amount&order=asc", false).await;
        assert!(body.contains("/transactions?page=1&amp;sortBy=amount&amp;order=desc"));
        assert!(body.contains("/transactions?page=1&amp;sortBy=status&amp;order=asc"));
        assert!(body.contains("금액 ▲"));
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_clamped() {
        let payments: Vec<Payment> = (0..20)
            .map(|i| payment(&format!("PAY-{:02}", i), "1000", &format!("2025-11-01T10:{:02}:00", i)))
            .collect();
        let (_, body) = get(app(payments, false), "/transactions?page=9&sortBy=bogus", false).await;
        assert!(body.contains("페이지 2 / 2 (총 20건)"));
        assert!(body.contains("/transactions?page=1&amp;sortBy=bogus&amp;order=desc"));
    }

    #[tokio::test]
    async fn test_htmx_request_gets_partial() {
        let app = app(vec![payment("PAY-1", "1000", "2025-11-01T10:00:00")], false);
        let (status, body) = get(app, "/transactions", true).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<div id='transactions-content'"));
        assert!(!body.contains("<html"));
        assert!(body.contains("PAY-1"));
    }

    #[tokio::test]
    async fn test_boosted_navigation_failure_swaps_error_box() {
        let headers = [("HX-Request", "true"), ("HX-Boosted", "true")];
        let (status, body) = get_with_headers(app(vec![], true), "/transactions?page=2", &headers).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.starts_with("<div id='transactions-content'>"));
        assert!(body.contains("거래 내역 데이터 조회에 실패했습니다."));
        assert!(!body.contains("<table"));

        // The shell that issues boosted requests must accept the 502 swap
        let (_, page) = get(app(vec![], false), "/transactions", false).await;
        assert!(page.contains("htmx:beforeSwap"));
        assert!(page.contains("evt.detail.xhr.status === 502"));
        assert!(page.contains("evt.detail.shouldSwap = true"));
    }

    #[tokio::test]
    async fn test_history_restore_gets_full_page() {
        let app = app(vec![payment("PAY-1", "1000", "2025-11-01T10:00:00")], false);
        let headers = [("HX-Request", "true"), ("HX-History-Restore-Request", "true")];
        let (status, body) = get_with_headers(app, "/transactions?page=1", &headers).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("<aside"));
        assert!(body.contains("PAY-1"));
    }

    #[test]
    fn test_is_htmx_request() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx_request(&headers));
        headers.insert("hx-request", "true".parse().unwrap());
        assert!(is_htmx_request(&headers));
        headers.insert("hx-history-restore-request", "true".parse().unwrap());
        assert!(!is_htmx_request(&headers));
    }

    #[tokio::test]
    async fn test_json_api() {
        let app = app(vec![payment("PAY-1", "1000", "2025-11-01T10:00:00")], false);
        let (status, body) = get(app, "/api/transactions?sortBy=amount&order=asc", false).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total_items"], 1);
        assert_eq!(json["sort_by"], "amount");
        assert_eq!(json["order"], "asc");
        assert_eq!(json["rows"][0]["amount_display"], "1,000원");
    }

    #[tokio::test]
    async fn test_json_api_failure() {
        let (status, body) = get(app(vec![], true), "/api/transactions", false).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "거래 내역 데이터 조회에 실패했습니다.");
        assert_eq!(json["code"], "UPSTREAM_FETCH_FAILED");
    }

    #[tokio::test]
    async fn test_health_and_index() {
        let (status, body) = get(app(vec![], false), "/api/health", false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");

        let res = app(vec![], false)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.status().is_redirection());
        assert_eq!(res.headers()["location"], "/transactions");
    }
}
