//! Serde types for request bodies and error responses of the product API.
//!
//! Request payloads are separate from the domain types so that optional
//! fields can be omitted from the JSON instead of being sent as `null`.

use serde::{Deserialize, Serialize};

use super::types::{InventoryStatus, Product, ProductDraft};

// ============================================================================
// Create payload
// ============================================================================

/// Body of `POST /api/products`.
///
/// Every optional field is listed here with `skip_serializing_if`, so the
/// server never receives an explicit null for a field the caller left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductPayload {
  pub code: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub quantity: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub internal_reference: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub shell_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub inventory_status: Option<InventoryStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rating: Option<i32>,
  pub created_at: i64,
  pub updated_at: i64,
}

impl NewProductPayload {
  /// Build the payload from a draft whose code has already been resolved.
  /// Both timestamps are set to `now_ms`.
  pub fn from_draft(draft: ProductDraft, code: String, now_ms: i64) -> Self {
    Self {
      code,
      name: draft.name,
      description: draft.description,
      image: draft.image,
      category: draft.category,
      price: draft.price,
      quantity: draft.quantity,
      internal_reference: draft.internal_reference,
      shell_id: draft.shell_id,
      inventory_status: draft.inventory_status,
      rating: draft.rating,
      created_at: now_ms,
      updated_at: now_ms,
    }
  }
}

// ============================================================================
// Update payload
// ============================================================================

/// Body of `PATCH /api/products/{id}`.
///
/// The id travels in the path, not the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
  pub code: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  pub price: f64,
  pub quantity: i32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub internal_reference: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub shell_id: Option<i64>,
  pub inventory_status: InventoryStatus,
  pub rating: i32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_at: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<i64>,
}

impl From<&Product> for ProductPatch {
  fn from(product: &Product) -> Self {
    Self {
      code: product.code.clone(),
      name: product.name.clone(),
      description: product.description.clone(),
      image: product.image.clone(),
      category: product.category.clone(),
      price: product.price,
      quantity: product.quantity,
      internal_reference: product.internal_reference.clone(),
      shell_id: product.shell_id,
      inventory_status: product.inventory_status,
      rating: product.rating,
      created_at: product.created_at,
      updated_at: product.updated_at,
    }
  }
}

// ============================================================================
// Error responses
// ============================================================================

/// JSON error body returned by the server on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
  pub message: Option<String>,
  // Anything else the server sends (timestamp, path, ...)
  #[serde(flatten)]
  pub extra: std::collections::HashMap<String, serde_json::Value>,
}
