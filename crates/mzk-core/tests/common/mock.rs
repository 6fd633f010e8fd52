//! Scripted transport for integration tests

use std::cell::RefCell;

use mzk_core::{EndpointConfig, HttpError, HttpResponse, MzkClient, Transport};

/// Answers requests from a list of routes. The first route whose pattern
/// is a substring of the URL wins; unmatched URLs get a 404. Every
/// requested URL is recorded.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(String, Result<HttpResponse, String>)>,
    requests: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200
    pub fn route(mut self, pattern: &str, body: impl Into<String>) -> Self {
        self.routes
            .push((pattern.to_string(), Ok(HttpResponse::ok(body))));
        self
    }

    /// Serve `body` with `status`
    pub fn status(mut self, pattern: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .push((pattern.to_string(), Ok(HttpResponse::new(status, body))));
        self
    }

    /// Fail at the transport level
    pub fn fail(mut self, pattern: &str) -> Self {
        self.routes
            .push((pattern.to_string(), Err("connection reset".to_string())));
        self
    }

    pub fn client(self) -> MzkClient<MockTransport> {
        MzkClient::new(self, EndpointConfig::default())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.routes.iter().find(|(pattern, _)| url.contains(pattern.as_str())) {
            Some((_, Ok(response))) => Ok(response.clone()),
            Some((_, Err(message))) => Err(HttpError::RequestFailed {
                message: message.clone(),
            }),
            None => Ok(HttpResponse::new(404, "Not Found")),
        }
    }
}
