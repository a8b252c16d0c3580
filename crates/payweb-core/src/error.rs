//! Error types for payweb-core

use payweb_client::FetchError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown to the user whenever the page cannot be built
pub const FETCH_FAILED_MESSAGE: &str = "거래 내역 데이터 조회에 실패했습니다.";

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One of the upstream requests failed
    UpstreamFetchFailed,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::UpstreamFetchFailed => write!(f, "UPSTREAM_FETCH_FAILED"),
        }
    }
}

/// Main error type for payweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(#[from] FetchError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::UpstreamFetch(_) => ErrorCode::UpstreamFetchFailed,
        }
    }

    /// Generic, user-facing description. Upstream details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            CoreError::UpstreamFetch(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
