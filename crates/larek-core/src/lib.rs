//! # larek-core: Pure Logic for the Web-Larek Storefront
//!
//! This crate is the **heart** of the storefront. It owns the event bus and
//! the application state, and has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Web-Larek Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Views (apps/storefront)                         │   │
//! │  │    Page ──► Card ──► Basket ──► Order ──► Contacts ──► Success  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intent events                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ larek-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  events   │  │   state   │  │   money   │  │ validation│  │   │
//! │  │   │ EventBus  │  │ AppState  │  │   Money   │  │ FormErrors│  │   │
//! │  │   │  Payload  │  │ OrderDraft│  │  format   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO RENDERING                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ change events                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 larek-api (HTTP Layer)                          │   │
//! │  │           GET /product/, GET /product/{id}, POST /order         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, OrderDraft, PaymentMethod, ...)
//! - [`money`] - Whole-unit money with synapse formatting
//! - [`category`] - Category to CSS class mapping
//! - [`validation`] - Checkout step validation
//! - [`events`] - Synchronous publish/subscribe bus
//! - [`state`] - The application state and its change events
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use larek_core::{AppState, EventBus, Money, Product};
//!
//! let events = EventBus::new();
//! let state = Rc::new(AppState::new(events.clone()));
//!
//! state.set_catalog(vec![
//!     Product::new("a", "Mouse", Some(Money::from_units(100))),
//!     Product::new("b", "Priceless", None),
//! ]);
//!
//! state.add_to_basket("a").unwrap();
//! assert!(state.add_to_basket("b").is_err());
//! assert_eq!(state.total(), Money::from_units(100));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod events;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use events::{EventBus, Payload, SubscriptionId};
pub use money::Money;
pub use state::AppState;
pub use types::*;
pub use validation::FormErrors;
