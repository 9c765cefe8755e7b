//! HttpTransport against a local product API.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, patch},
  Json, Router,
};
use catalog_cache::config::ApiConfig;
use catalog_cache::products::api_types::{NewProductPayload, ProductPatch};
use catalog_cache::{
  CatalogError, Environment, HttpTransport, ProductCache, ProductDraft, ProductTransport,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// == Helper Functions ==

#[derive(Clone, Default)]
struct ServerState {
  /// (method, path, body) of every request received
  requests: Arc<Mutex<Vec<(String, String, Value)>>>,
}

impl ServerState {
  fn record(&self, method: &str, path: String, body: Value) {
    self
      .requests
      .lock()
      .unwrap()
      .push((method.to_string(), path, body));
  }

  fn requests(&self) -> Vec<(String, String, Value)> {
    self.requests.lock().unwrap().clone()
  }
}

fn not_found() -> Response {
  (
    StatusCode::NOT_FOUND,
    Json(json!({ "message": "Product not found", "status": 404 })),
  )
    .into_response()
}

async fn list(State(state): State<ServerState>) -> Json<Value> {
  state.record("GET", "/api/products".to_string(), Value::Null);
  Json(json!([
    { "id": 1, "code": "abc", "name": "Bamboo Watch", "price": 65.0, "inventoryStatus": "INSTOCK" },
    { "id": 2, "code": "def", "name": "Black Watch", "price": 72.0, "inventoryStatus": "LOWSTOCK" }
  ]))
}

async fn create(State(state): State<ServerState>, Json(mut body): Json<Value>) -> Response {
  state.record("POST", "/api/products".to_string(), body.clone());
  if body["name"] == "conflict" {
    return (
      StatusCode::CONFLICT,
      Json(json!({ "message": "Code already exists" })),
    )
      .into_response();
  }
  body["id"] = json!(10);
  (StatusCode::CREATED, Json(body)).into_response()
}

async fn update(
  State(state): State<ServerState>,
  Path(id): Path<i64>,
  Json(mut body): Json<Value>,
) -> Response {
  state.record("PATCH", format!("/api/products/{}", id), body.clone());
  if id == 404 {
    return not_found();
  }
  body["id"] = json!(id);
  Json(body).into_response()
}

async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Response {
  state.record("DELETE", format!("/api/products/{}", id), Value::Null);
  if id == 404 {
    return not_found();
  }
  StatusCode::NO_CONTENT.into_response()
}

async fn spawn_server(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{}", addr)
}

async fn start_api() -> (HttpTransport, ServerState) {
  let state = ServerState::default();
  let app = Router::new()
    .route("/api/products", get(list).post(create))
    .route("/api/products/:id", patch(update).delete(delete))
    .with_state(state.clone());

  let url = spawn_server(app).await;
  let transport = HttpTransport::new(&ApiConfig {
    url,
    timeout_secs: Some(5),
  })
  .unwrap();

  (transport, state)
}

fn payload(name: &str) -> NewProductPayload {
  NewProductPayload::from_draft(ProductDraft::new(name), "xk3f9q2p".to_string(), 1_700_000_000_000)
}

// == Transport Tests ==

#[tokio::test]
async fn test_list_decodes_products() {
  let (transport, _) = start_api().await;

  let products = transport.list().await.unwrap();

  assert_eq!(products.len(), 2);
  assert_eq!(products[0].code, "abc");
  assert_eq!(products[1].inventory_status, catalog_cache::InventoryStatus::LowStock);
}

#[tokio::test]
async fn test_create_posts_payload_without_nulls() {
  let (transport, state) = start_api().await;

  let created = transport.create(&payload("X")).await.unwrap();

  assert_eq!(created.id, 10);
  assert_eq!(created.code, "xk3f9q2p");

  let requests = state.requests();
  let (method, path, body) = &requests[0];
  assert_eq!(method, "POST");
  assert_eq!(path, "/api/products");
  assert_eq!(body["createdAt"], json!(1_700_000_000_000i64));
  assert!(body.get("description").is_none());
  assert!(body.as_object().unwrap().values().all(|v| !v.is_null()));
}

#[tokio::test]
async fn test_create_error_body_is_decoded() {
  let (transport, _) = start_api().await;

  let err = transport.create(&payload("conflict")).await.unwrap_err();

  assert_eq!(err.status, Some(409));
  assert_eq!(err.body_message(), Some("Code already exists"));
}

#[tokio::test]
async fn test_update_patches_item_path() {
  let (transport, state) = start_api().await;
  let product = transport.list().await.unwrap().remove(1);

  let updated = transport
    .update(product.id, &ProductPatch::from(&product))
    .await
    .unwrap();

  assert_eq!(updated.id, 2);
  let requests = state.requests();
  let (method, path, body) = requests.last().unwrap();
  assert_eq!(method, "PATCH");
  assert_eq!(path, "/api/products/2");
  assert!(body.get("id").is_none());
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
  let (transport, state) = start_api().await;

  transport.delete(2).await.unwrap();

  assert_eq!(state.requests()[0].1, "/api/products/2");
}

#[tokio::test]
async fn test_delete_not_found() {
  let (transport, _) = start_api().await;

  let err = transport.delete(404).await.unwrap_err();

  assert_eq!(err.status, Some(404));
  assert_eq!(err.body_message(), Some("Product not found"));
}

#[tokio::test]
async fn test_plain_text_error_has_no_body() {
  let app = Router::new().route(
    "/api/products",
    get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
  );
  let url = spawn_server(app).await;
  let transport = HttpTransport::new(&ApiConfig {
    url,
    timeout_secs: None,
  })
  .unwrap();

  let err = transport.list().await.unwrap_err();

  assert_eq!(err.status, Some(500));
  assert!(err.body.is_none());
}

#[tokio::test]
async fn test_unreachable_server_has_no_status() {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let transport = HttpTransport::new(&ApiConfig {
    url: format!("http://{}", addr),
    timeout_secs: Some(2),
  })
  .unwrap();

  let err = transport.list().await.unwrap_err();
  assert_eq!(err.status, None);
}

// == Cache over HTTP ==

#[tokio::test]
async fn test_cache_round_trip_over_http() {
  let (transport, _) = start_api().await;
  let cache = ProductCache::new(Arc::new(transport), Environment::Production);

  cache.fetch_all().await.unwrap();
  let created = cache.create(ProductDraft::new("X")).await.unwrap();
  assert_eq!(created.code.len(), 8);

  let ids: Vec<i64> = cache.products().iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![10, 1, 2]);

  cache.delete(1).await.unwrap();
  let ids: Vec<i64> = cache.products().iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![10, 2]);
}

#[tokio::test]
async fn test_cache_create_conflict_message() {
  let (transport, _) = start_api().await;
  let cache = ProductCache::new(Arc::new(transport), Environment::Production);

  let err = cache.create(ProductDraft::new("conflict")).await.unwrap_err();

  assert!(matches!(err, CatalogError::Create { .. }));
  assert_eq!(err.to_string(), "Code already exists");
  assert!(cache.products().is_empty());
}
