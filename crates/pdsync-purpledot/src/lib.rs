pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;

pub use client::PurpleDotClient;
pub use error::PurpleDotError;
pub use extract::{extract_delivery_date, ExtractedDate};
pub use normalize::{normalize_timestamp, DISPLAY_FORMAT, DISPLAY_TIMEZONE};
