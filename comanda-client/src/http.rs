//! HTTP client with timeout, retry and bearer-token handling
//!
//! All requests share one retry policy: network failures, 5xx, 408 and
//! 429 are retried with linear backoff; every other 4xx fails fast. The
//! bearer token lives behind a shared handle so clones of the client (and
//! the services holding them) see set/clear immediately.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::response::split_envelope;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Query parameters; `None` values are not serialized.
pub type QueryPairs<'a> = &'a [(&'a str, Option<String>)];

/// Binary file part staged for a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Request body shapes. Kept as plain data so the request can be rebuilt
/// from parts on every retry attempt.
#[derive(Debug, Clone)]
enum Body {
    Empty,
    Json(Value),
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

/// HTTP client for the back-office API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    max_attempts: u32,
    retry_base_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
            max_attempts: config.max_attempts.max(1),
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    // ========== Token handling ==========

    /// Install the bearer token used on every subsequent request
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    /// Remove the bearer token; the Authorization header is no longer sent
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    // ========== Typed requests ==========

    /// GET with query parameters, decoded into `T`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryPairs<'_>,
    ) -> ClientResult<T> {
        let payload = self.request(Method::GET, path, query, Body::Empty).await?;
        Self::decode(payload)
    }

    /// POST a JSON body, decoded into `T`
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let payload = self.post_json(path, serde_json::to_value(body)?).await?;
        Self::decode(payload)
    }

    // ========== Raw JSON requests (services normalize manually) ==========

    /// GET returning the envelope payload as raw JSON
    pub async fn get_json(&self, path: &str, query: QueryPairs<'_>) -> ClientResult<Value> {
        self.request(Method::GET, path, query, Body::Empty).await
    }

    /// POST a JSON body, returning the envelope payload
    pub async fn post_json(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::POST, path, &[], Body::Json(body)).await
    }

    /// PUT a JSON body, returning the envelope payload
    pub async fn put_json(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::PUT, path, &[], Body::Json(body)).await
    }

    /// DELETE, returning the envelope payload (often null)
    pub async fn delete_json(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::DELETE, path, &[], Body::Empty).await
    }

    /// POST a multipart form (text fields + one file part)
    pub async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: FilePart,
    ) -> ClientResult<Value> {
        self.request(Method::POST, path, &[], Body::Multipart { fields, file })
            .await
    }

    /// PUT a multipart form (text fields + one file part)
    pub async fn put_multipart(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: FilePart,
    ) -> ClientResult<Value> {
        self.request(Method::PUT, path, &[], Body::Multipart { fields, file })
            .await
    }

    // ========== Core request loop ==========

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: QueryPairs<'_>,
        body: Body,
    ) -> ClientResult<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                let delay = self.retry_base_delay * (attempt - 1);
                tracing::warn!(
                    url = %url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
            }

            let request = self.build_request(&method, &url, query, &body)?;
            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let text = response
                            .text()
                            .await
                            .map_err(|e| ClientError::Network(e.to_string()))?;
                        let value = if text.trim().is_empty() {
                            Value::Null
                        } else {
                            serde_json::from_str(&text)
                                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?
                        };
                        return split_envelope(value).map_err(ClientError::from);
                    }

                    let message = response.text().await.unwrap_or_default();
                    let error = Self::status_error(status, message);
                    if Self::retryable_status(status) && attempt < self.max_attempts {
                        continue;
                    }
                    return Err(error);
                }
                Err(e) => {
                    if attempt < self.max_attempts {
                        continue;
                    }
                    return Err(ClientError::Network(e.to_string()));
                }
            }
        }

        Err(ClientError::Network("request failed".to_string()))
    }

    fn build_request(
        &self,
        method: &Method,
        url: &str,
        query: QueryPairs<'_>,
        body: &Body,
    ) -> ClientResult<reqwest::RequestBuilder> {
        let mut request = self.client.request(method.clone(), url);

        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        if let Some(token) = self.token() {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(value),
            Body::Multipart { fields, file } => {
                let mut form = reqwest::multipart::Form::new();
                for (key, value) in fields {
                    form = form.text(key.clone(), value.clone());
                }
                let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(|e| ClientError::Validation(format!("invalid mime type: {e}")))?;
                form = form.part(file.field.clone(), part);
                request.multipart(form)
            }
        };

        Ok(request)
    }

    /// 5xx, 408 and 429 are transient; everything else in the 4xx range
    /// means retrying would repeat the same rejection.
    fn retryable_status(status: StatusCode) -> bool {
        status.is_server_error()
            || status == StatusCode::REQUEST_TIMEOUT
            || status == StatusCode::TOO_MANY_REQUESTS
    }

    fn status_error(status: StatusCode, body: String) -> ClientError {
        // Prefer the envelope message when the error body carries one
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body
                }
            });

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            StatusCode::REQUEST_TIMEOUT => ClientError::Network(message),
            StatusCode::TOO_MANY_REQUESTS => ClientError::Server(message),
            s if s.is_server_error() => ClientError::Server(message),
            _ => ClientError::Validation(message),
        }
    }

    fn decode<T: DeserializeOwned>(payload: Value) -> ClientResult<T> {
        serde_json::from_value(payload).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_status() {
        assert!(HttpClient::retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(HttpClient::retryable_status(StatusCode::BAD_GATEWAY));
        assert!(HttpClient::retryable_status(StatusCode::REQUEST_TIMEOUT));
        assert!(HttpClient::retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!HttpClient::retryable_status(StatusCode::BAD_REQUEST));
        assert!(!HttpClient::retryable_status(StatusCode::UNAUTHORIZED));
        assert!(!HttpClient::retryable_status(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_status_error_prefers_envelope_message() {
        let err = HttpClient::status_error(
            StatusCode::BAD_REQUEST,
            r#"{"status":"error","message":"name taken"}"#.to_string(),
        );
        assert!(matches!(err, ClientError::Validation(msg) if msg == "name taken"));
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(
            HttpClient::status_error(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::CONFLICT, String::new()),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ClientError::Server(_)
        ));
    }

    #[test]
    fn test_token_shared_across_clones() {
        let client = ClientConfig::new("http://localhost:9").build_client();
        let clone = client.clone();
        client.set_token("abc");
        assert_eq!(clone.token().as_deref(), Some("abc"));
        clone.clear_token();
        assert!(client.token().is_none());
    }
}
