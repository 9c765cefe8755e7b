//! Observable product cache.
//!
//! This module owns the client-side copy of the catalog:
//! - Mirrors the product collection as last confirmed by the server
//! - Applies create/update/delete locally only after the remote call succeeds
//! - Publishes every mutation to subscribed views
//! - Serves a local snapshot when the remote read fails outside production

mod fallback;
mod layer;
mod traits;
mod view;

pub use fallback::{BundledSnapshot, FileSnapshot, StaticSnapshot};
pub use layer::ProductCache;
pub use traits::{CacheSource, FallbackSource};
pub use view::ProductsView;
