//! Canned transport for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use skillscout_core::transport::{HttpResponse, Transport};

/// Transport answering from a fixed URL -> response table; everything else
/// is a 404.
#[derive(Default)]
pub struct CannedTransport {
    responses: HashMap<String, (u16, String)>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a 200 response.
    pub fn ok(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), (200, body.to_string()));
        self
    }

    /// Register an arbitrary status.
    pub fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), (status, body.to_string()));
        self
    }
}

impl Transport for CannedTransport {
    fn get(&self, url: &str) -> anyhow::Result<HttpResponse> {
        match self.responses.get(url) {
            Some((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
