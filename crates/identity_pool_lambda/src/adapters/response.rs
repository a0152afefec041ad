use std::time::Duration;

use identity_pool_core::contract::CustomResourceResponse;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponseSendError {
    #[error("failed to build response http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to send custom resource response: {0}")]
    Transport(String),
}

pub trait ResponseSender {
    fn send_response(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<(), ResponseSendError>;
}

/// Uploads the response document to the pre-signed `ResponseURL`.
#[derive(Clone)]
pub struct HttpResponseSender {
    client: reqwest::Client,
}

impl HttpResponseSender {
    pub fn new(timeout: Duration) -> Result<Self, ResponseSendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ResponseSendError::Client)?;
        Ok(Self { client })
    }
}

impl ResponseSender for HttpResponseSender {
    fn send_response(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<(), ResponseSendError> {
        let body = response.to_json_bytes();
        // The pre-signed URL is signed without a content type.
        let request = self
            .client
            .put(response_url)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, body.len())
            .body(body);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                request
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map(|_| ())
                    .map_err(|error| ResponseSendError::Transport(error.to_string()))
            })
        })
    }
}
