//! The transport client: one configured HTTP client for the catalog API.
//!
//! Every request goes through [`ApiClient::send`] (or its raw variant):
//! the bearer credential is attached when present, and a 401 response
//! clears the credential and notifies the unauthorized observer before the
//! call fails. No retries happen at this layer - a failed call surfaces
//! as an error to the caller.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::credentials::{CredentialStore, UnauthorizedObserver};
use crate::error::ApiError;

/// Optional parts of a request: body, query parameters, extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// JSON body.
    pub body: Option<serde_json::Value>,
    /// Query parameters, appended in order.
    pub params: Vec<(String, String)>,
    /// Extra headers beyond the defaults.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options with only a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body fails to serialize.
    pub fn json<B: serde::Serialize>(body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            body: Some(body),
            ..Self::default()
        })
    }

    /// Options with only query parameters.
    #[must_use]
    pub fn params(params: Vec<(String, String)>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }
}

/// The single configured HTTP client for the catalog API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    credentials: Arc<dyn CredentialStore>,
    unauthorized: Arc<dyn UnauthorizedObserver>,
}

impl ApiClient {
    /// Create a client from configuration and the two injected seams.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if the underlying HTTP client
    /// cannot be built.
    pub fn new(
        config: ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        unauthorized: Arc<dyn UnauthorizedObserver>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            config,
            credentials,
            unauthorized,
        })
    }

    /// The configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send a request and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401 (after the logout side effect)
    /// - [`ApiError::Status`] on any other non-2xx, body preserved
    /// - [`ApiError::Request`] on network failure
    /// - [`ApiError::Decode`] when the body does not match `T`
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.send_raw(method, path, options).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request and return the successful raw response.
    ///
    /// Used where the caller needs response headers (the list endpoint's
    /// `X-Total-Count`) or wants to ignore the body (delete).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::send`], minus `Decode`.
    #[tracing::instrument(skip(self, options), fields(method = %method, path))]
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{path}", self.config.base_url());

        let mut request = self.http.request(method, &url);

        if !options.params.is_empty() {
            request = request.query(&options.params);
        }

        // Attach the bearer credential when one is persisted
        if let Some(token) = self.credentials.get() {
            request = request.bearer_auth(token);
        }

        for (name, value) in &options.headers {
            request = request.header(name, value);
        }

        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            // Logout side effect first, then fail the call - the caller
            // must never observe a silent success
            tracing::warn!("Unauthorized response, clearing credential");
            self.credentials.clear();
            self.unauthorized.on_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
