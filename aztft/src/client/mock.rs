use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use serde_json::Value;

use super::{ArmTransport, ClientError, Request};

/// Serves canned responses keyed by ARM path or data plane url, compared case-insensitively.
/// Anything not registered answers `NotFound`.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, Result<Value, ClientError>>>,
    requests:  Mutex<Vec<Request>>,
}

fn key(target: &str) -> String {
    target.trim_end_matches('/').to_lowercase()
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, target: &str, body: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key(target), Ok(body));
    }

    pub fn insert_error(&self, target: &str, error: ClientError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key(target), Err(error));
    }

    /// Every request served so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ArmTransport for MockTransport {
    async fn get(&self, request: &Request) -> Result<Value, ClientError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.get(&key(request.target())) {
            Some(response) => response.clone(),
            None => Err(ClientError::NotFound(request.target().to_string())),
        }
    }
}
