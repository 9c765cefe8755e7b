use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::products::api_types::{ApiErrorBody, NewProductPayload, ProductPatch};
use crate::products::types::Product;

const COLLECTION_PATH: &str = "api/products";

/// The four remote primitives the cache is built on.
#[async_trait]
pub trait ProductTransport: Send + Sync {
  /// `GET collection`
  async fn list(&self) -> Result<Vec<Product>, TransportError>;

  /// `POST collection`
  async fn create(&self, payload: &NewProductPayload) -> Result<Product, TransportError>;

  /// `PATCH item(id)`
  async fn update(&self, id: i64, patch: &ProductPatch) -> Result<Product, TransportError>;

  /// `DELETE item(id)`
  async fn delete(&self, id: i64) -> Result<(), TransportError>;
}

/// Product API client over HTTP
#[derive(Clone)]
pub struct HttpTransport {
  client: reqwest::Client,
  collection_url: String,
}

impl HttpTransport {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    let base = Url::parse(&config.url)
      .map_err(|e| eyre!("Invalid API url {}: {}", config.url, e))?;

    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      client,
      collection_url: format!("{}/{}", base.as_str().trim_end_matches('/'), COLLECTION_PATH),
    })
  }

  pub fn collection_url(&self) -> &str {
    &self.collection_url
  }

  pub fn item_url(&self, id: i64) -> String {
    format!("{}/{}", self.collection_url, id)
  }

  /// Send the request and turn non-2xx responses into a `TransportError`.
  async fn execute(&self, request: RequestBuilder) -> Result<Response, TransportError> {
    let response = request
      .send()
      .await
      .map_err(|e| TransportError::network(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    // Bodies that are not JSON are dropped; the status still tells the story
    let body = serde_json::from_str::<ApiErrorBody>(&text).ok();
    let reason = status.canonical_reason().unwrap_or("Request failed");

    Err(TransportError::status(status.as_u16(), reason, body))
  }

  async fn execute_json<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
  ) -> Result<T, TransportError> {
    let response = self.execute(request).await?;
    let status = response.status().as_u16();

    response
      .json::<T>()
      .await
      .map_err(|e| TransportError::status(status, format!("Failed to decode response: {}", e), None))
  }
}

#[async_trait]
impl ProductTransport for HttpTransport {
  async fn list(&self) -> Result<Vec<Product>, TransportError> {
    self
      .execute_json(self.client.get(&self.collection_url))
      .await
  }

  async fn create(&self, payload: &NewProductPayload) -> Result<Product, TransportError> {
    self
      .execute_json(self.client.post(&self.collection_url).json(payload))
      .await
  }

  async fn update(&self, id: i64, patch: &ProductPatch) -> Result<Product, TransportError> {
    self
      .execute_json(self.client.patch(self.item_url(id)).json(patch))
      .await
  }

  async fn delete(&self, id: i64) -> Result<(), TransportError> {
    self.execute(self.client.delete(self.item_url(id))).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn api(url: &str) -> ApiConfig {
    ApiConfig {
      url: url.to_string(),
      timeout_secs: None,
    }
  }

  #[test]
  fn test_paths_from_base_url() {
    let transport = HttpTransport::new(&api("http://localhost:8080")).unwrap();
    assert_eq!(transport.collection_url(), "http://localhost:8080/api/products");
    assert_eq!(transport.item_url(12), "http://localhost:8080/api/products/12");
  }

  #[test]
  fn test_trailing_slash_and_prefix_are_kept_clean() {
    let transport = HttpTransport::new(&api("https://shop.example.com/backend/")).unwrap();
    assert_eq!(
      transport.collection_url(),
      "https://shop.example.com/backend/api/products"
    );
  }

  #[test]
  fn test_invalid_base_url_is_rejected() {
    assert!(HttpTransport::new(&api("not a url")).is_err());
  }
}
