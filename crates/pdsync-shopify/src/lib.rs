pub mod client;
pub mod error;
pub mod types;

pub use client::{AdminEndpoint, ShopifyAdminClient};
pub use error::ShopifyError;
