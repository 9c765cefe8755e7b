//! Error types for the product cache.

use std::path::PathBuf;
use thiserror::Error;

use crate::products::api_types::ApiErrorBody;

/// Message used when a failed create carries nothing more specific.
pub const DEFAULT_CREATE_ERROR: &str = "Failed to create product";

/// A remote call that could not complete or came back with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render_transport(.status, .message, .body))]
pub struct TransportError {
  /// HTTP status, `None` when no response was received
  pub status: Option<u16>,
  /// Transport-level description of the failure
  pub message: String,
  /// Decoded error body, if the server sent JSON
  pub body: Option<ApiErrorBody>,
}

impl TransportError {
  /// The request never produced a response (connect failure, timeout, ...).
  pub fn network(message: impl Into<String>) -> Self {
    Self {
      status: None,
      message: message.into(),
      body: None,
    }
  }

  /// The server answered with a non-success status.
  pub fn status(status: u16, message: impl Into<String>, body: Option<ApiErrorBody>) -> Self {
    Self {
      status: Some(status),
      message: message.into(),
      body,
    }
  }

  /// Message embedded in the server's error body, if any.
  pub fn body_message(&self) -> Option<&str> {
    self
      .body
      .as_ref()
      .and_then(|b| b.message.as_deref())
      .filter(|m| !m.is_empty())
  }
}

fn render_transport(status: &Option<u16>, message: &str, body: &Option<ApiErrorBody>) -> String {
  let detail = body
    .as_ref()
    .and_then(|b| b.message.as_deref())
    .filter(|m| !m.is_empty());

  match (status, detail) {
    (Some(status), Some(detail)) => format!("HTTP {}: {} ({})", status, message, detail),
    (Some(status), None) => format!("HTTP {}: {}", status, message),
    (None, _) => message.to_string(),
  }
}

/// Errors surfaced by [`crate::cache::ProductCache`] operations.
#[derive(Debug, Error)]
pub enum CatalogError {
  /// Remote call failed; returned unchanged from fetch (production),
  /// update and delete.
  #[error(transparent)]
  Transport(#[from] TransportError),

  /// A create call failed. Carries the most specific message available.
  #[error("{message}")]
  Create {
    message: String,
    #[source]
    source: TransportError,
  },

  /// The dev snapshot used after a failed fetch could not be loaded.
  #[error("Failed to load fallback products from {}: {message}", .path.display())]
  Fallback { path: PathBuf, message: String },
}

impl CatalogError {
  /// Translate a failed create call. The server's own message wins, then
  /// the transport message, then [`DEFAULT_CREATE_ERROR`].
  pub fn create_failed(source: TransportError) -> Self {
    let message = source
      .body_message()
      .map(str::to_string)
      .or_else(|| Some(source.message.clone()).filter(|m| !m.is_empty()))
      .unwrap_or_else(|| DEFAULT_CREATE_ERROR.to_string());

    CatalogError::Create { message, source }
  }

  /// HTTP status of the underlying remote failure, if there was one.
  pub fn status(&self) -> Option<u16> {
    match self {
      CatalogError::Transport(e) | CatalogError::Create { source: e, .. } => e.status,
      CatalogError::Fallback { .. } => None,
    }
  }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
  use super::*;

  fn body(message: Option<&str>) -> ApiErrorBody {
    ApiErrorBody {
      message: message.map(String::from),
      ..Default::default()
    }
  }

  #[test]
  fn test_create_error_prefers_body_message() {
    let err = CatalogError::create_failed(TransportError::status(
      409,
      "Conflict",
      Some(body(Some("Code already exists"))),
    ));
    assert_eq!(err.to_string(), "Code already exists");
    assert_eq!(err.status(), Some(409));
  }

  #[test]
  fn test_create_error_falls_back_to_transport_message() {
    let err = CatalogError::create_failed(TransportError::status(500, "Internal Server Error", Some(body(None))));
    assert_eq!(err.to_string(), "Internal Server Error");
  }

  #[test]
  fn test_create_error_default_message() {
    let err = CatalogError::create_failed(TransportError::network(""));
    assert_eq!(err.to_string(), DEFAULT_CREATE_ERROR);
    assert_eq!(err.status(), None);
  }

  #[test]
  fn test_transport_display() {
    let err = TransportError::status(404, "Not Found", Some(body(Some("Product not found"))));
    assert_eq!(err.to_string(), "HTTP 404: Not Found (Product not found)");
    assert_eq!(TransportError::network("connection refused").to_string(), "connection refused");
    assert_eq!(
      TransportError::status(500, "Internal Server Error", Some(body(Some("")))).to_string(),
      "HTTP 500: Internal Server Error"
    );
  }

  #[test]
  fn test_create_error_exposes_transport_source() {
    let err = CatalogError::create_failed(TransportError::status(409, "Conflict", None));
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "HTTP 409: Conflict");
  }
}
