#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tempfile::TempDir;

pub const BOUNDARY: &str = "cookbook-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    pub upload_dir: PathBuf,
    _uploads: TempDir,
}

/// In-memory database with the schema applied, on a single connection so
/// every query sees the same database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create in-memory SQLite pool");

    cookbook::db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = test_pool().await;
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");
        let upload_dir = uploads.path().to_path_buf();

        let router = cookbook::build_app(pool.clone(), upload_dir.clone());

        Self {
            router,
            db: pool,
            upload_dir,
            _uploads: uploads,
        }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(req).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        self.request(req).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response {
        self.send_json("POST", uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response {
        self.send_json("PUT", uri, body).await
    }

    async fn send_json(&self, method: &str, uri: &str, body: Value) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    /// Send a multipart form built by [`multipart_body`].
    pub async fn send_multipart(&self, method: &str, uri: &str, body: Vec<u8>) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method(method)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.request(req).await
    }

    /// Create a recipe book through the API and return its id.
    pub async fn create_book(&self, title: &str) -> String {
        let resp = self
            .post_json("/api/recipe-books", serde_json::json!({ "title": title }))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await["id"].as_str().unwrap().to_string()
    }

    /// Create a recipe through the API and return the response JSON.
    pub async fn create_recipe(&self, body: Value) -> Value {
        let resp = self.post_json("/api/recipes", body).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await
    }

    pub async fn count(&self, sql: &str, bind: &str) -> i64 {
        let row: (i64,) = sqlx::query_as(sql)
            .bind(bind)
            .fetch_one(&self.db)
            .await
            .unwrap();
        row.0
    }
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(resp: Response) -> Value {
    let body = body_string(resp).await;
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("Invalid JSON ({e}): {body}"))
}

/// Encode text fields and an optional `(field, file_name, bytes)` file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
