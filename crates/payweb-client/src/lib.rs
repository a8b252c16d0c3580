//! Upstream payments API client
//!
//! Three read-only endpoints are consumed:
//! - `/payments/list`: every payment transaction
//! - `/common/payment-status/all`: status code catalog
//! - `/common/paymemt-type/all`: pay type catalog (the misspelling is the
//!   upstream's real path)

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub mod error;
pub mod types;

pub use error::FetchError;
pub use types::{CodeItem, Envelope, PayTypeItem, Payment};

pub const PAYMENTS_PATH: &str = "/payments/list";
pub const PAYMENT_STATUS_PATH: &str = "/common/payment-status/all";
pub const PAY_TYPE_PATH: &str = "/common/paymemt-type/all";

/// Source reference type
pub type SourceRef = Arc<dyn PaymentSource>;

/// Everything one page view needs from the upstream
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub payments: Vec<Payment>,
    pub statuses: Vec<CodeItem>,
    pub pay_types: Vec<PayTypeItem>,
}

/// Read access to payments and their lookup catalogs
#[async_trait]
pub trait PaymentSource: Send + Sync {
    /// Full, uncached payment list
    async fn payments(&self) -> Result<Vec<Payment>, FetchError>;

    /// Payment status catalog
    async fn payment_statuses(&self) -> Result<Vec<CodeItem>, FetchError>;

    /// Pay type catalog
    async fn pay_types(&self) -> Result<Vec<PayTypeItem>, FetchError>;
}

/// Fetch the payment list and both catalogs concurrently.
///
/// All three must succeed; the first failure is returned and the other
/// results are discarded.
pub async fn fetch_snapshot(source: &dyn PaymentSource) -> Result<Snapshot, FetchError> {
    let (payments, statuses, pay_types) = tokio::try_join!(
        source.payments(),
        source.payment_statuses(),
        source.pay_types(),
    )?;

    Ok(Snapshot {
        payments,
        statuses,
        pay_types,
    })
}

/// `PaymentSource` backed by the REST API
#[derive(Debug, Clone)]
pub struct HttpPaymentSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPaymentSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and unwrap the `data` field of its envelope
    async fn get_data<T>(&self, path: &str) -> Result<Vec<T>, FetchError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| {
                log::error!("Upstream request to {} failed: {}", path, source);
                FetchError::Transport {
                    endpoint: path.to_string(),
                    source,
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            log::error!("Upstream {} responded with {}", path, status);
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope = res.json::<Envelope<Vec<T>>>().await.map_err(|e| {
            log::error!("Upstream {} sent an unreadable body: {}", path, e);
            FetchError::Decode {
                endpoint: path.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(envelope.into_data())
    }
}

#[async_trait]
impl PaymentSource for HttpPaymentSource {
    async fn payments(&self) -> Result<Vec<Payment>, FetchError> {
        self.get_data(PAYMENTS_PATH).await
    }

    async fn payment_statuses(&self) -> Result<Vec<CodeItem>, FetchError> {
        self.get_data(PAYMENT_STATUS_PATH).await
    }

    async fn pay_types(&self) -> Result<Vec<PayTypeItem>, FetchError> {
        self.get_data(PAY_TYPE_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/v1", addr)
    }

    fn upstream() -> Router {
        Router::new()
            .route(
                "/api/v1/payments/list",
                get(|| async {
                    Json(json!({
                        "status": 200,
                        "message": "OK",
                        "data": [
                            {"paymentCode": "P1", "mchtCode": "M1", "amount": "100", "currency": "KRW",
                             "payType": "CARD", "status": "SUCCESS", "paymentAt": "2025-11-01T10:00:00"},
                            {"paymentCode": "P2", "mchtCode": "M2", "amount": "5", "currency": "KRW",
                             "payType": "BANK", "status": "FAILED", "paymentAt": "2025-11-02T10:00:00"}
                        ]
                    }))
                }),
            )
            .route(
                "/api/v1/common/payment-status/all",
                get(|| async {
                    Json(json!({"status": 200, "message": "OK",
                                "data": [{"code": "SUCCESS", "description": "결제 완료"}]}))
                }),
            )
            .route(
                "/api/v1/common/paymemt-type/all",
                get(|| async { Json(json!({"status": 200, "message": "OK"})) }),
            )
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let base = serve(upstream()).await;
        let source = HttpPaymentSource::new(&format!("{}/", base));

        let snapshot = fetch_snapshot(&source).await.unwrap();
        assert_eq!(snapshot.payments.len(), 2);
        assert_eq!(snapshot.payments[1].payment_code, "P2");
        assert_eq!(snapshot.statuses[0].description, "결제 완료");
        // The pay type endpoint sent no `data` field
        assert!(snapshot.pay_types.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_fails_whole_snapshot() {
        let router = Router::new()
            .route("/api/v1/payments/list", get(|| async { Json(json!({"data": []})) }))
            .route("/api/v1/common/payment-status/all", get(|| async { Json(json!({"data": []})) }))
            .route(
                "/api/v1/common/paymemt-type/all",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
            );
        let base = serve(router).await;
        let source = HttpPaymentSource::new(&base);

        let err = fetch_snapshot(&source).await.unwrap_err();
        match err {
            FetchError::Status { ref endpoint, status } => {
                assert_eq!(endpoint, PAY_TYPE_PATH);
                assert_eq!(status, 503);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_status_error() {
        let router = Router::new().route(
            "/api/v1/payments/list",
            get(|| async { Json(json!({"data": []})) }),
        );
        let base = serve(router).await;
        let source = HttpPaymentSource::new(&base);

        let err = source.payment_statuses().await.unwrap_err();
        assert_eq!(err.endpoint(), PAYMENT_STATUS_PATH);
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let router = Router::new().route("/api/v1/payments/list", get(|| async { "not json" }));
        let base = serve(router).await;
        let source = HttpPaymentSource::new(&base);

        let err = source.payments().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = HttpPaymentSource::new(&format!("http://{}/api/v1", addr));

        let err = source.payments().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[test]
    fn test_url_joining() {
        let source = HttpPaymentSource::new("http://localhost:1/api/v1/");
        assert_eq!(source.base_url(), "http://localhost:1/api/v1");
        assert_eq!(source.url(PAY_TYPE_PATH), "http://localhost:1/api/v1/common/paymemt-type/all");
    }
}
