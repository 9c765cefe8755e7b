//! Client-side data access for a remote product catalog.
//!
//! [`ProductCache`] keeps an ordered, observable copy of the catalog and
//! routes every write through the remote API before touching it.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod products;

pub use cache::{
  BundledSnapshot, CacheSource, FallbackSource, FileSnapshot, ProductCache, ProductsView,
  StaticSnapshot,
};
pub use config::{Config, Environment};
pub use error::{CatalogError, TransportError};
pub use products::{HttpTransport, InventoryStatus, Product, ProductDraft, ProductTransport};
