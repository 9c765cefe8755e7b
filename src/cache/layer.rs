//! Product cache that reconciles the local collection with the remote API.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::fallback::{BundledSnapshot, FileSnapshot};
use super::traits::{CacheSource, CacheState, FallbackSource};
use super::view::ProductsView;
use crate::config::{Config, Environment};
use crate::error::{CatalogError, Result};
use crate::products::api_types::{NewProductPayload, ProductPatch};
use crate::products::code::resolve_code;
use crate::products::{HttpTransport, Product, ProductDraft, ProductTransport};

/// In-memory product collection kept in step with the remote catalog.
///
/// Every write goes to the server first; the local collection only changes
/// once the server has confirmed, and observers are notified before the
/// operation returns. A failed call never touches the collection.
///
/// Concurrent operations are not serialized. Their local mutations apply in
/// the order the remote responses arrive.
pub struct ProductCache {
  transport: Arc<dyn ProductTransport>,
  fallback: Arc<dyn FallbackSource>,
  environment: Environment,
  state: Arc<watch::Sender<CacheState>>,
}

impl ProductCache {
  /// Create an empty cache. The dev fallback defaults to the sample dataset
  /// compiled into the crate.
  pub fn new(transport: Arc<dyn ProductTransport>, environment: Environment) -> Self {
    let (state, _) = watch::channel(CacheState::default());

    Self {
      transport,
      fallback: Arc::new(BundledSnapshot),
      environment,
      state: Arc::new(state),
    }
  }

  /// Build an HTTP-backed cache from configuration.
  pub fn from_config(config: &Config) -> color_eyre::Result<Self> {
    let transport = HttpTransport::new(&config.api)?;
    let cache = Self::new(Arc::new(transport), config.environment());

    Ok(match &config.fallback.path {
      Some(path) => cache.with_fallback(Arc::new(FileSnapshot::new(path))),
      None => cache,
    })
  }

  /// Replace the dev fallback source.
  pub fn with_fallback(mut self, fallback: Arc<dyn FallbackSource>) -> Self {
    self.fallback = fallback;
    self
  }

  pub fn environment(&self) -> Environment {
    self.environment
  }

  /// Subscribe to the collection.
  pub fn subscribe(&self) -> ProductsView {
    ProductsView::new(self.state.subscribe())
  }

  /// Snapshot of the current collection.
  pub fn products(&self) -> Vec<Product> {
    self.state.borrow().products.clone()
  }

  /// Where the current collection came from.
  pub fn source(&self) -> CacheSource {
    self.state.borrow().source
  }

  /// Reload the whole collection from the server.
  ///
  /// Outside production a failed read is absorbed: the dev snapshot replaces
  /// the collection and is returned instead. In production the error is
  /// returned and the collection is left as it was.
  pub async fn fetch_all(&self) -> Result<Vec<Product>> {
    let error = match self.transport.list().await {
      Ok(products) => {
        debug!(count = products.len(), "Fetched products");
        self.replace(products.clone(), CacheSource::Remote);
        return Ok(products);
      }
      Err(e) => e,
    };

    error!(status = ?error.status, error = %error, "Failed to fetch products");

    if self.environment.is_production() {
      return Err(error.into());
    }

    let products = self.fallback.load().await.inspect_err(|e| {
      error!(error = %e, "Failed to load fallback products");
    })?;

    warn!(
      count = products.len(),
      source = %self.fallback.describe(),
      "Serving fallback products"
    );
    self.replace(products.clone(), CacheSource::DevFallback);

    Ok(products)
  }

  /// Create a product and put the server's copy at the front of the
  /// collection.
  ///
  /// A missing or empty code is replaced with a generated one. Both
  /// timestamps are set to now.
  pub async fn create(&self, mut draft: ProductDraft) -> Result<Product> {
    let code = resolve_code(draft.code.take());
    let payload = NewProductPayload::from_draft(draft, code, Utc::now().timestamp_millis());

    let product = self.transport.create(&payload).await.map_err(|e| {
      error!(
        status = ?e.status,
        message = e.body_message().unwrap_or(e.message.as_str()),
        "Failed to create product"
      );
      CatalogError::create_failed(e)
    })?;

    info!(id = product.id, code = %product.code, "Created product");

    self.state.send_modify(|state| {
      // Ids are unique in the collection
      state.products.retain(|p| p.id != product.id);
      state.products.insert(0, product.clone());
    });

    Ok(product)
  }

  /// Send the product's fields as a partial update and swap the server's
  /// copy in at the same position.
  pub async fn update(&self, product: &Product) -> Result<Product> {
    let patch = ProductPatch::from(product);

    let updated = self
      .transport
      .update(product.id, &patch)
      .await
      .inspect_err(|e| error!(id = product.id, status = ?e.status, error = %e, "Failed to update product"))?;

    let replaced = self.state.send_if_modified(|state| {
      match state.products.iter_mut().find(|p| p.id == updated.id) {
        Some(slot) => {
          *slot = updated.clone();
          true
        }
        None => false,
      }
    });

    if replaced {
      info!(id = updated.id, "Updated product");
    } else {
      debug!(id = updated.id, "Updated product not present in cache");
    }

    Ok(updated)
  }

  /// Delete a product remotely, then drop it from the collection if present.
  pub async fn delete(&self, id: i64) -> Result<()> {
    self
      .transport
      .delete(id)
      .await
      .inspect_err(|e| error!(id, status = ?e.status, error = %e, "Failed to delete product"))?;

    let removed = self.state.send_if_modified(|state| {
      let before = state.products.len();
      state.products.retain(|p| p.id != id);
      state.products.len() != before
    });

    info!(id, removed, "Deleted product");

    Ok(())
  }

  fn replace(&self, products: Vec<Product>, source: CacheSource) {
    self.state.send_modify(|state| {
      state.products = products;
      state.source = source;
    });
  }
}

impl Clone for ProductCache {
  fn clone(&self) -> Self {
    Self {
      transport: Arc::clone(&self.transport),
      fallback: Arc::clone(&self.fallback),
      environment: self.environment,
      state: Arc::clone(&self.state),
    }
  }
}
