//! Error types for payweb-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use payweb_core::CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The transactions page could not be built; rendered as HTML
    #[error("Page unavailable: {error}")]
    Page { error: CoreError, partial: bool },

    /// The JSON endpoint could not be served
    #[error("API unavailable: {0}")]
    Json(CoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Page { .. } | ApiError::Json(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Page { error, partial } => {
                let content = crate::error_content(error.user_message());
                let body = if partial {
                    content
                } else {
                    crate::base_html("오류", &crate::layout("/transactions", &content))
                };
                (status, Html(body)).into_response()
            }
            ApiError::Json(error) => {
                let body = ErrorBody {
                    error: error.user_message().to_string(),
                    code: error.code().to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payweb_client::FetchError;

    fn upstream_error() -> CoreError {
        CoreError::from(FetchError::Status {
            endpoint: "/payments/list".to_string(),
            status: 500,
        })
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        let res = ApiError::Json(upstream_error()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let res = ApiError::Page { error: upstream_error(), partial: false }.into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }
}
