use http::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{ApiError, Result},
    services::token::TokenManager,
};

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// JSON client for the StockScope REST API.
///
/// One attempt per call: no retries, no timeout, no backoff.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root, e.g. `http://localhost:8080/api`.
    /// * `tokens` - The session the client reads credentials from.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `ApiClient`.
    pub fn new(base_url: impl Into<String>, tokens: TokenManager) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Sends one request and decodes the JSON response.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method.
    /// * `path` - The path below the base URL, starting with `/`.
    /// * `body` - Serialized as JSON when present.
    ///
    /// # Returns
    ///
    /// The decoded body. An empty body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// A 401 clears the session and yields [`ApiError::Unauthorized`]. Any
    /// other non-success status yields [`ApiError::Server`].
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self.send(method, path, body).await?;
        if is_blank(&bytes) {
            return Ok(sonic_rs::from_str("null")?);
        }
        Ok(sonic_rs::from_slice(&bytes)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Sends a DELETE. The backend confirms deletes in plain text, so the
    /// body is not decoded.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.tokens.get_token().filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.body(sonic_rs::to_string(body)?);
        }

        tracing::debug!("🌐 API Request: {} {}", method, url);

        let response = request.send().await.map_err(|e| {
            tracing::error!("❌ {} {} failed: {}", method, url, e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?.to_vec();

        if status.is_success() {
            tracing::debug!("✅ {} {} -> {}", method, url, status);
            return Ok(bytes);
        }

        Err(self.failure(status, &bytes))
    }

    fn failure(&self, status: StatusCode, bytes: &[u8]) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("🔒 Backend rejected the session, logging out");
            self.tokens.logout();
            return ApiError::Unauthorized;
        }

        let payload = sonic_rs::from_slice::<sonic_rs::Value>(bytes).ok();
        let err = ApiError::from_status(status, payload);
        tracing::warn!("❌ Backend error {}: {}", status.as_u16(), err);
        err
    }
}
