//! # API Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / non-2xx response                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (this module) ← server `error` field or status text          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront handler logs it with tracing::error!                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// HTTP layer errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a usable response.
    ///
    /// ## When This Occurs
    /// - Connection refused or DNS failure
    /// - Response body is not the JSON we expected
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    ///
    /// `message` is the body's `error` field when present, else the
    /// canonical status text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Status code of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
