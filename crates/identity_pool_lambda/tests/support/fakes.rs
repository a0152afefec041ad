#![allow(dead_code)]

use std::sync::Mutex;

use identity_pool_core::contract::CustomResourceResponse;
use identity_pool_core::properties::IdentityPoolSpec;
use identity_pool_lambda::adapters::identity_pool::{IdentityPoolApi, IdentityPoolApiError};
use identity_pool_lambda::adapters::response::{ResponseSendError, ResponseSender};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Create(IdentityPoolSpec),
    Update(String, IdentityPoolSpec),
    Delete(String),
}

pub struct FakeIdentityPoolApi {
    created_id: String,
    failure: Option<IdentityPoolApiError>,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakeIdentityPoolApi {
    pub fn returning(created_id: &str) -> Self {
        Self {
            created_id: created_id.to_string(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: IdentityPoolApiError) -> Self {
        Self {
            created_id: String::new(),
            failure: Some(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    fn record(&self, call: ApiCall) -> Result<(), IdentityPoolApiError> {
        self.calls.lock().expect("poisoned mutex").push(call);
        self.failure.clone().map_or(Ok(()), Err)
    }
}

impl IdentityPoolApi for FakeIdentityPoolApi {
    fn create_identity_pool(&self, spec: &IdentityPoolSpec) -> Result<String, IdentityPoolApiError> {
        self.record(ApiCall::Create(spec.clone()))?;
        Ok(self.created_id.clone())
    }

    fn update_identity_pool(
        &self,
        identity_pool_id: &str,
        spec: &IdentityPoolSpec,
    ) -> Result<(), IdentityPoolApiError> {
        self.record(ApiCall::Update(identity_pool_id.to_string(), spec.clone()))
    }

    fn delete_identity_pool(&self, identity_pool_id: &str) -> Result<(), IdentityPoolApiError> {
        self.record(ApiCall::Delete(identity_pool_id.to_string()))
    }
}

pub struct RecordingSender {
    sent: Mutex<Vec<(String, CustomResourceResponse)>>,
    fail: bool,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, CustomResourceResponse)> {
        self.sent.lock().expect("poisoned mutex").clone()
    }
}

impl ResponseSender for RecordingSender {
    fn send_response(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<(), ResponseSendError> {
        if self.fail {
            return Err(ResponseSendError::Transport(
                "connection refused".to_string(),
            ));
        }
        self.sent
            .lock()
            .expect("poisoned mutex")
            .push((response_url.to_string(), response.clone()));
        Ok(())
    }
}
