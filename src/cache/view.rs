//! Read-only subscription to the cached product collection.

use futures::stream::{self, Stream};
use tokio::sync::watch;

use super::traits::{CacheSource, CacheState};
use crate::products::Product;

/// Push-updated view of the cache.
///
/// Each view tracks which version it has seen, so `changed()` only wakes for
/// mutations that happened after the last read. Dropping the view
/// unsubscribes it.
#[derive(Debug, Clone)]
pub struct ProductsView {
  rx: watch::Receiver<CacheState>,
}

impl ProductsView {
  pub(crate) fn new(rx: watch::Receiver<CacheState>) -> Self {
    Self { rx }
  }

  /// Snapshot of the current collection.
  pub fn current(&self) -> Vec<Product> {
    self.rx.borrow().products.clone()
  }

  pub fn source(&self) -> CacheSource {
    self.rx.borrow().source
  }

  pub fn len(&self) -> usize {
    self.rx.borrow().products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rx.borrow().products.is_empty()
  }

  /// Look up a cached product by id.
  pub fn get(&self, id: i64) -> Option<Product> {
    self.rx.borrow().products.iter().find(|p| p.id == id).cloned()
  }

  /// Whether a mutation happened since this view last read the collection.
  pub fn has_changed(&self) -> bool {
    self.rx.has_changed().unwrap_or(false)
  }

  /// Wait for the next mutation and return the new collection.
  ///
  /// Returns `None` once the cache has been dropped.
  pub async fn changed(&mut self) -> Option<Vec<Product>> {
    self.rx.changed().await.ok()?;
    Some(self.rx.borrow_and_update().products.clone())
  }

  /// Every subsequent collection as a stream. Ends when the cache is dropped.
  pub fn into_stream(self) -> impl Stream<Item = Vec<Product>> {
    stream::unfold(self, |mut view| async move {
      let products = view.changed().await?;
      Some((products, view))
    })
  }
}
