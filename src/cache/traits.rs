//! Core traits and types for the product cache.

use async_trait::async_trait;

use crate::error::Result;
use crate::products::Product;

/// Source of the sample dataset served when the remote read fails outside
/// production.
#[async_trait]
pub trait FallbackSource: Send + Sync {
  /// Human-readable location, used in logs
  fn describe(&self) -> String;

  /// Load the full snapshot, in display order.
  async fn load(&self) -> Result<Vec<Product>>;
}

/// Indicates where the cached collection came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheSource {
  /// Nothing has been fetched yet
  #[default]
  Empty,
  /// Last fetch succeeded against the remote service
  Remote,
  /// Remote fetch failed and the dev snapshot is being served instead.
  /// Never authoritative.
  DevFallback,
}

impl CacheSource {
  pub fn is_authoritative(self) -> bool {
    self == CacheSource::Remote
  }
}

/// State held behind the cache's watch channel.
#[derive(Debug, Clone, Default)]
pub(crate) struct CacheState {
  pub products: Vec<Product>,
  pub source: CacheSource,
}
