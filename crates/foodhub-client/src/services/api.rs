use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::models::{LoginRequest, LoginResponse, Meal, Provider, RegisterRequest};

const API_PREFIX: &str = "/api";

/// HTTP client for the marketplace REST backend.
///
/// No retries, no timeout and no caching: every call is a single request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(client: Client, api_url: &str) -> Self {
        Self {
            client,
            base_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{API_PREFIX}{endpoint}", self.base_url)
    }

    /// Sends a JSON request and returns the parsed body.
    ///
    /// The body is parsed as JSON whatever the status. A failure status turns
    /// into [`ClientError::Api`] carrying the body's `error` message.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ClientResult<Value> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!("{method} {url}");

        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }

        if let Some(body) = body.filter(|b| !b.is_null()) {
            req = req.body(serde_json::to_vec(body)?);
        }

        let res = req.send().await.map_err(|e| {
            tracing::warn!("{method} {url} failed: {e}");
            ClientError::Transport(e)
        })?;

        let status = res.status();
        let bytes = res.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            let err = ClientError::from_failure_body(status, &data);
            tracing::warn!("{method} {url} returned {status}: {err}");
            return Err(err);
        }

        Ok(data)
    }

    async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let data = self.request(endpoint, method, body, token).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn fetch_meals(&self) -> ClientResult<Vec<Meal>> {
        self.request_as("/meals", Method::GET, None, None).await
    }

    pub async fn fetch_providers(&self) -> ClientResult<Vec<Provider>> {
        self.request_as("/providers", Method::GET, None, None).await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<LoginResponse> {
        let body = serde_json::to_value(credentials)?;
        self.request_as("/auth/login", Method::POST, Some(&body), None)
            .await
    }

    /// The success body is backend-defined and returned untouched.
    pub async fn register(&self, form: &RegisterRequest) -> ClientResult<Value> {
        let body = serde_json::to_value(form)?;
        self.request("/auth/register", Method::POST, Some(&body), None)
            .await
    }
}
