//! HTTP Object Store Adapter
//!
//! Reads objects from an S3-compatible endpoint with path-style URLs:
//! `GET {base_url}/{bucket}/{key}`. Authentication is an optional bearer
//! token; presigned or public buckets need none.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::ports::{ObjectStore, ObjectStoreError};

/// S3-compatible HTTP object store.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    base_url: String,
    auth_bearer: Option<Secret<String>>,
    client: Client,
}

impl HttpObjectStore {
    pub fn new(
        base_url: impl Into<String>,
        auth_bearer: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ObjectStoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ObjectStoreError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_bearer: auth_bearer.filter(|t| !t.is_empty()).map(Secret::new),
            client,
        })
    }

    /// Object URL with each key segment percent-encoded.
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        let encoded_key: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encoded_key.join("/")
        )
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        if bucket.is_empty() || key.is_empty() {
            return Err(ObjectStoreError::InvalidKey("empty bucket or key".to_string()));
        }

        let mut request = self.client.get(self.object_url(bucket, key));
        if let Some(token) = &self.auth_bearer {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ObjectStoreError::Http(format!("fetch failed: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ObjectStoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            status if !status.is_success() => {
                Err(ObjectStoreError::Http(format!("fetch failed with status {status}")))
            }
            _ => response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| ObjectStoreError::Http(format!("failed to read body: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::HeaderMap, http::StatusCode as AxumStatus, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn object_url_is_path_style_and_encoded() {
        let store =
            HttpObjectStore::new("http://s3.local/", None, Duration::from_secs(5)).unwrap();

        assert_eq!(
            store.object_url("uploads", "2024/feedback file.csv"),
            "http://s3.local/uploads/2024/feedback%20file.csv"
        );
    }

    #[tokio::test]
    async fn fetches_object_with_bearer() {
        let router = Router::new().route(
            "/:bucket/*key",
            get(|Path((bucket, key)): Path<(String, String)>, headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth != "Bearer token-1" {
                    return Err(AxumStatus::FORBIDDEN);
                }
                if bucket == "uploads" && key == "feedback.csv" {
                    Ok("Comment\nhello\n")
                } else {
                    Err(AxumStatus::NOT_FOUND)
                }
            }),
        );
        let base = serve(router).await;
        let store =
            HttpObjectStore::new(base, Some("token-1".into()), Duration::from_secs(5)).unwrap();

        let bytes = store.get("uploads", "feedback.csv").await.unwrap();
        assert_eq!(bytes, b"Comment\nhello\n");

        let err = store.get("uploads", "missing.csv").await.unwrap_err();
        assert!(matches!(err, ObjectStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn server_errors_are_http_errors() {
        let router = Router::new().route(
            "/:bucket/*key",
            get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(router).await;
        let store = HttpObjectStore::new(base, None, Duration::from_secs(5)).unwrap();

        let err = store.get("uploads", "a.csv").await.unwrap_err();
        assert!(matches!(err, ObjectStoreError::Http(_)));
    }
}
