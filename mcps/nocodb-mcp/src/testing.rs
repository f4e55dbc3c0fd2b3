//! Test doubles shared by the unit tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::nocodb::{ApiRequest, ApiResponse, NocoDbError, NocoDbResult, Transport};

/// Transport that records every request and answers each with the same reply
pub struct RecordingTransport {
    reply: NocoDbResult<Vec<u8>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn json(body: Value) -> Arc<Self> {
        Self::raw(serde_json::to_vec(&body).unwrap())
    }

    pub fn raw(body: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(body),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(NocoDbError::Request(message.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> NocoDbResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map(|body| ApiResponse { status: 200, body })
    }
}
