//! HTTP access to the library backend
//!
//! [`Transport`] is the seam between the domain logic and the network;
//! [`HttpClient`] is the blocking reqwest implementation. [`MzkClient`]
//! wraps a transport and turns every failure (transport error, non-success
//! status, undecodable JSON) into a logged `None`.

mod native;

pub use native::HttpClient;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{EndpointConfig, MzkConfig};

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Client setup failed: {message}")]
    ClientSetup { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GET of a URL.
///
/// Implementations do not retry; one call is one request.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        (**self).get(url)
    }
}

/// Library client: a transport plus the endpoint templates it talks to
pub struct MzkClient<T: Transport> {
    transport: T,
    endpoints: EndpointConfig,
}

impl<T: Transport> MzkClient<T> {
    pub fn new(transport: T, endpoints: EndpointConfig) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Body of a successful response, `None` otherwise
    pub fn get_text(&self, url: &str) -> Option<String> {
        tracing::debug!(url, "GET");
        match self.transport.get(url) {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                tracing::warn!(url, status = response.status, "request returned non-success status");
                None
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "request failed");
                None
            }
        }
    }

    /// Successful response decoded as JSON, `None` on any failure
    pub fn get_json<D: DeserializeOwned>(&self, url: &str) -> Option<D> {
        let body = self.get_text(url)?;
        match serde_json::from_str(&body) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(url, error = %err, "response is not the expected JSON");
                None
            }
        }
    }
}

impl MzkClient<HttpClient> {
    /// Network client configured from `config`
    pub fn from_config(config: &MzkConfig) -> Result<Self, HttpError> {
        Ok(Self::new(HttpClient::new(&config.http)?, config.endpoints.clone()))
    }
}
