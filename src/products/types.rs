use serde::{Deserialize, Serialize};

/// Stock level reported by the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InventoryStatus {
  #[default]
  InStock,
  LowStock,
  OutOfStock,
}

/// A catalog item as the server returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i64,
  pub code: String,
  #[serde(default)]
  pub name: String,
  pub description: Option<String>,
  pub image: Option<String>,
  pub category: Option<String>,
  #[serde(default)]
  pub price: f64,
  #[serde(default)]
  pub quantity: i32,
  pub internal_reference: Option<String>,
  pub shell_id: Option<i64>,
  #[serde(default)]
  pub inventory_status: InventoryStatus,
  #[serde(default)]
  pub rating: i32,
  /// Epoch milliseconds
  pub created_at: Option<i64>,
  /// Epoch milliseconds
  pub updated_at: Option<i64>,
}

/// Input for creating a product. The server assigns the id.
///
/// An empty or missing `code` is filled in with a generated one before the
/// create call goes out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
  pub code: Option<String>,
  pub name: String,
  pub description: Option<String>,
  pub image: Option<String>,
  pub category: Option<String>,
  pub price: Option<f64>,
  pub quantity: Option<i32>,
  pub internal_reference: Option<String>,
  pub shell_id: Option<i64>,
  pub inventory_status: Option<InventoryStatus>,
  pub rating: Option<i32>,
}

impl ProductDraft {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }
}
