//! Error types for the storefront app.
//!
//! ```text
//! DomError ─────┐
//! ApiError ─────┼──► AppError ──► main exits non-zero
//! ConfigError ──┘
//! ```
//!
//! Only startup failures travel this path. Errors inside event handlers are
//! logged where they happen.

use larek_api::ApiError;

pub use crate::config::ConfigError;

/// Missing template or element. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Template not found: #{0}")]
    TemplateNotFound(String),

    #[error("Unsupported selector: {0}")]
    InvalidSelector(String),

    #[error("Element <{tag}> has no `{attr}` attribute")]
    MissingAttribute { tag: String, attr: String },
}

/// Storefront startup errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}

pub type DomResult<T> = Result<T, DomError>;

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_error_converts() {
        let err: AppError = DomError::TemplateNotFound("basket".into()).into();
        assert_eq!(err.to_string(), "Document error: Template not found: #basket");
    }

    #[test]
    fn test_config_error_converts() {
        let err: AppError = ConfigError::InvalidValue("LAREK_API_URL".into()).into();
        assert!(matches!(err, AppError::Config(_)));
    }
}
