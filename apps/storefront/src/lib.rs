//! # Web-Larek Storefront
//!
//! Catalog browsing, basket and two-step checkout, rendered into a retained
//! element tree.
//!
//! ## Module Organization
//!
//! - [`dom`] - Element tree, selectors, listeners, HTML output
//! - [`templates`] - Page markup and template fragments
//! - [`components`] - Views (page, card, basket, forms, modal, success)
//! - [`handlers`] - `Storefront` composition root and event wiring
//! - [`config`] - Environment configuration
//! - [`error`] - Storefront error types

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod handlers;
pub mod templates;

pub use config::StoreConfig;
pub use error::{AppError, AppResult, DomError};
pub use handlers::Storefront;

use std::rc::Rc;

use larek_api::AppApi;
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs the storefront once and prints the rendered page.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,larek=debug, can be overridden with RUST_LOG        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • LAREK_API_ORIGIN / LAREK_API_URL / LAREK_CDN_URL                  │
/// │                                                                         │
/// │  3. Build Document & Views ───────────────────────────────────────────► │
/// │     • Missing template or element aborts startup                        │
/// │                                                                         │
/// │  4. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • GET /product/ on a LocalSet, failure is logged                    │
/// │                                                                         │
/// │  5. Print page HTML to stdout                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting Web-Larek storefront");

    let config = StoreConfig::load()?;
    info!(api = %config.api_url, cdn = %config.cdn_url, "Configuration loaded");

    let api = AppApi::new(config.cdn_url.as_str(), config.api_url.as_str())?;

    LocalSet::new()
        .run_until(async move {
            let storefront = Storefront::new(templates::storefront_document(), Rc::new(api))?;
            storefront.load_catalog();
            storefront.settle().await;

            println!("{}", storefront.page_html());
            Ok::<(), AppError>(())
        })
        .await
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the page.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,larek=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
