//! # Web-Larek Storefront Entry Point
//!
//! Loads configuration, wires the storefront, fetches the catalog and writes
//! the rendered page to stdout. Setup lives in `lib.rs` for testability.

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    larek_storefront::run().await?;
    Ok(())
}
