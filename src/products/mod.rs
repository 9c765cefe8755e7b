pub mod api_types;
pub mod client;
pub mod code;
pub mod types;

pub use client::{HttpTransport, ProductTransport};
pub use types::{InventoryStatus, Product, ProductDraft};
