//! The single shared entry point for every network call.
//!
//! # Design
//! `ApiClient` holds the base URL and a `Transport`, nothing else, so one
//! instance can be shared by every view without locking. Each call is split
//! into `build_request` (plain data out) and `parse_response` (plain data in),
//! with `send` running the transport in between and logging the exchange.
//! Errors are classified here and handed back unchanged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{AuthApi, ProductsApi, UsersApi};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

const JSON: &str = "application/json";

pub struct ApiClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<UreqTransport> {
    /// Client over the blocking `ureq` transport.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new(config))
    }
}

impl<T> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub fn build_request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: self.url(path),
            headers: vec![
                ("content-type".to_string(), JSON.to_string()),
                ("accept".to_string(), JSON.to_string()),
            ],
            body,
        })
    }

    /// Decode a 2xx body as `R`; anything else becomes `ApiError::Http`.
    ///
    /// An empty body decodes as JSON `null`, which suits `()` and `Option<_>`.
    pub fn parse_response<R>(&self, response: HttpResponse) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        if !response.is_success() {
            return Err(ApiError::from_status(response.status, response.body));
        }
        if response.body.trim().is_empty() {
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| ApiError::Deserialization(e.to_string()));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn send<B, R>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(method, path, body)?;
        debug!(method = method.as_str(), url = %request.url, "sending request");

        let result = self
            .transport
            .execute(&request)
            .and_then(|response| {
                debug!(
                    method = method.as_str(),
                    url = %request.url,
                    status = response.status,
                    "response received"
                );
                self.parse_response(response)
            });

        if let Err(err) = &result {
            match err {
                ApiError::Http { status, body, .. } => warn!(
                    method = method.as_str(),
                    url = %request.url,
                    status = *status,
                    body = %body,
                    "response error"
                ),
                other => warn!(
                    method = method.as_str(),
                    url = %request.url,
                    kind = other.kind(),
                    error = %other,
                    "request failed"
                ),
            }
        }
        result
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(HttpMethod::Get, path, None::<&()>)
    }

    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(HttpMethod::Post, path, Some(body))
    }

    pub fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(HttpMethod::Put, path, Some(body))
    }

    pub fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(HttpMethod::Delete, path, None::<&()>)
    }

    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    pub fn products(&self) -> ProductsApi<'_, T> {
        ProductsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_, T> {
        UsersApi::new(self)
    }
}
