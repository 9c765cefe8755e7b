//! Dev fallback sources: the sample dataset compiled into the crate, a JSON
//! file on disk, and an in-memory list.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::traits::FallbackSource;
use crate::error::{CatalogError, Result};
use crate::products::Product;

/// Snapshot read from a JSON array of products on disk.
///
/// The file is read on every `load`, so edits show up on the next fallback.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
  path: PathBuf,
}

impl FileSnapshot {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn fail(&self, message: impl ToString) -> CatalogError {
    CatalogError::Fallback {
      path: self.path.clone(),
      message: message.to_string(),
    }
  }
}

#[async_trait]
impl FallbackSource for FileSnapshot {
  fn describe(&self) -> String {
    self.path.display().to_string()
  }

  async fn load(&self) -> Result<Vec<Product>> {
    let contents = tokio::fs::read_to_string(&self.path)
      .await
      .map_err(|e| self.fail(e))?;

    serde_json::from_str(&contents).map_err(|e| self.fail(e))
  }
}

const BUNDLED_NAME: &str = "assets/products.json";
const BUNDLED_PRODUCTS: &str = include_str!("../../assets/products.json");

/// Sample dataset shipped inside the binary. Works from any directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSnapshot;

#[async_trait]
impl FallbackSource for BundledSnapshot {
  fn describe(&self) -> String {
    format!("bundled {}", BUNDLED_NAME)
  }

  async fn load(&self) -> Result<Vec<Product>> {
    serde_json::from_str(BUNDLED_PRODUCTS).map_err(|e| CatalogError::Fallback {
      path: PathBuf::from(BUNDLED_NAME),
      message: e.to_string(),
    })
  }
}

/// Fixed in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshot {
  products: Vec<Product>,
}

impl StaticSnapshot {
  pub fn new(products: Vec<Product>) -> Self {
    Self { products }
  }
}

#[async_trait]
impl FallbackSource for StaticSnapshot {
  fn describe(&self) -> String {
    format!("static snapshot ({} products)", self.products.len())
  }

  async fn load(&self) -> Result<Vec<Product>> {
    Ok(self.products.clone())
  }
}
