pub mod client;
pub mod errors;
pub mod types;

use async_trait::async_trait;

pub use client::ProductClient;
pub use errors::FetchError;
pub use types::ProductSnapshot;

/// Anything that can produce the current pricing for a product id.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_snapshot(&self, product_id: &str) -> Result<ProductSnapshot, FetchError>;
}
