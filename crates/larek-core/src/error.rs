//! # Error Types
//!
//! Domain-specific error types for larek-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  larek-core errors (this file)                                         │
//! │  ├── CoreError        - Basket / state rule violations                 │
//! │  └── ValidationError  - Checkout field failures                        │
//! │                                                                         │
//! │  larek-api errors (separate crate)                                     │
//! │  └── ApiError         - Transport and server failures                  │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── AppError         - Startup failures (config, missing elements)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending id or field in the message
//! 3. Validation messages are the exact text shown under the form

use thiserror::Error;

use crate::types::OrderField;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by state mutations.
///
/// None of these are fatal: the orchestration layer logs them and leaves the
/// state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product id is not part of the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product has no price and cannot be put in the basket.
    ///
    /// ## User Workflow
    /// ```text
    /// Preview "Бесценно" item
    ///      │
    ///      ▼
    /// button is disabled ("Недоступно")
    ///      │
    ///      ▼
    /// add_to_basket("id") anyway ──► NotForSale("id"), basket unchanged
    /// ```
    #[error("Product {0} is not for sale")]
    NotForSale(String),

    /// Adding the product would push the basket total past `i64::MAX`.
    #[error("Basket total overflows when adding product {0}")]
    TotalOverflow(String),

    /// Checkout attempted with nothing in the basket.
    #[error("Basket is empty")]
    EmptyBasket,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout field validation failures.
///
/// The `Display` text is the message rendered in the form's error line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required checkout field is empty.
    #[error("{}", required_message(.0))]
    Required(OrderField),
}

fn required_message(field: &OrderField) -> &'static str {
    match field {
        OrderField::Address => "Необходимо указать адрес",
        OrderField::Payment => "Необходимо указать способ оплаты",
        OrderField::Email => "Необходимо указать email",
        OrderField::Phone => "Необходимо указать телефон",
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
