//! # larek-api: HTTP Layer for the Web-Larek Storefront
//!
//! This crate talks to the larek REST API and hands back `larek-core`
//! domain types. It knows nothing about views or state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Web-Larek Data Flow                                │
//! │                                                                         │
//! │  storefront::handlers (load catalog, submit order)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  larek-api (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐          ┌───────────────────────┐     │   │
//! │  │   │   Api (client.rs) │◄─────────│  AppApi (larek.rs)    │     │   │
//! │  │   │                   │          │                       │     │   │
//! │  │   │  get / post       │          │  LarekApi trait       │     │   │
//! │  │   │  status handling  │          │  CDN image rewrite    │     │   │
//! │  │   └───────────────────┘          └───────────────────────┘     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  https://larek-api.nomoreparties.co/api/weblarek                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - Generic JSON client (`Api`) and list envelope
//! - [`larek`] - `LarekApi` trait and its HTTP implementation
//! - [`error`] - API error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use larek_api::{AppApi, LarekApi};
//!
//! let api = AppApi::new(
//!     "https://larek-api.nomoreparties.co/content/weblarek",
//!     "https://larek-api.nomoreparties.co/api/weblarek",
//! );
//! let products = api.get_product_list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod larek;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{Api, ApiListResponse};
pub use error::{ApiError, ApiResult};
pub use larek::{AppApi, LarekApi};
