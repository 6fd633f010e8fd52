//! Native HTTP client using reqwest's blocking API

use super::{HttpError, HttpResponse, Transport};
use crate::config::HttpConfig;
use reqwest::blocking::Client;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        // A `None` timeout disables reqwest's 30 second default
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| HttpError::ClientSetup {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let url = reqwest::Url::parse(url).map_err(|_| HttpError::InvalidUrl {
            url: url.to_string(),
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| HttpError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| HttpError::RequestFailed {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}
