use identity_pool_core::contract::{
    identity_pool_data, CustomResourceEvent, CustomResourceResponse, RequestType,
};
use identity_pool_core::physical_id::looks_like_identity_pool_id;
use identity_pool_core::properties::{parse_identity_pool_spec, IdentityPoolSpec, PropertyError};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::identity_pool::{IdentityPoolApi, IdentityPoolApiError};
use crate::adapters::response::{ResponseSendError, ResponseSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub log_stream_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Properties(#[from] PropertyError),
    #[error("Missing PhysicalResourceId for {0} request")]
    MissingPhysicalResourceId(&'static str),
    #[error(transparent)]
    Api(#[from] IdentityPoolApiError),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid custom resource event: {0}")]
    InvalidEvent(String),
    #[error(transparent)]
    Send(#[from] ResponseSendError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleOutcome {
    pub physical_resource_id: String,
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyDeleted,
    /// The physical id was never an identity pool id; nothing to delete.
    Skipped,
}

pub fn validate(event: &CustomResourceEvent) -> Result<IdentityPoolSpec, LifecycleError> {
    Ok(parse_identity_pool_spec(&event.resource_properties)?)
}

pub fn create(
    event: &CustomResourceEvent,
    api: &impl IdentityPoolApi,
) -> Result<LifecycleOutcome, LifecycleError> {
    let spec = validate(event)?;
    let identity_pool_id = api.create_identity_pool(&spec)?;
    info!(
        identity_pool_id = %identity_pool_id,
        identity_pool_name = %spec.identity_pool_name,
        "identity pool created"
    );

    Ok(LifecycleOutcome {
        data: identity_pool_data(&identity_pool_id, &spec.identity_pool_name),
        physical_resource_id: identity_pool_id,
    })
}

pub fn update(
    event: &CustomResourceEvent,
    api: &impl IdentityPoolApi,
) -> Result<LifecycleOutcome, LifecycleError> {
    let spec = validate(event)?;
    let identity_pool_id = event
        .physical_resource_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or(LifecycleError::MissingPhysicalResourceId(
            RequestType::Update.as_str(),
        ))?;

    api.update_identity_pool(&identity_pool_id, &spec)?;
    info!(
        identity_pool_id = %identity_pool_id,
        identity_pool_name = %spec.identity_pool_name,
        "identity pool updated"
    );

    Ok(LifecycleOutcome {
        data: identity_pool_data(&identity_pool_id, &spec.identity_pool_name),
        physical_resource_id: identity_pool_id,
    })
}

pub fn delete(
    event: &CustomResourceEvent,
    api: &impl IdentityPoolApi,
) -> Result<DeleteOutcome, LifecycleError> {
    let Some(identity_pool_id) = event
        .physical_resource_id
        .as_deref()
        .filter(|id| looks_like_identity_pool_id(id))
    else {
        info!(
            physical_resource_id = event.physical_resource_id.as_deref().unwrap_or_default(),
            "physical id is not an identity pool id, skipping delete"
        );
        return Ok(DeleteOutcome::Skipped);
    };

    match api.delete_identity_pool(identity_pool_id) {
        Ok(()) => {
            info!(identity_pool_id, "identity pool deleted");
            Ok(DeleteOutcome::Deleted)
        }
        Err(error) if error.is_not_found() => {
            warn!(identity_pool_id, %error, "identity pool already deleted");
            Ok(DeleteOutcome::AlreadyDeleted)
        }
        Err(error) => Err(error.into()),
    }
}

/// Runs the requested lifecycle operation and maps its outcome to the
/// response document. Never fails: errors become `FAILED` responses.
pub fn build_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
    api: &impl IdentityPoolApi,
) -> CustomResourceResponse {
    let result = match event.request_type {
        RequestType::Create => create(event, api),
        RequestType::Update => update(event, api),
        RequestType::Delete => delete(event, api).map(|_| LifecycleOutcome {
            physical_resource_id: existing_physical_id(event, context),
            data: Map::new(),
        }),
    };

    match result {
        Ok(outcome) => {
            CustomResourceResponse::success(event, outcome.physical_resource_id, outcome.data)
        }
        Err(lifecycle_error) => {
            error!(
                request_type = event.request_type.as_str(),
                logical_resource_id = %event.logical_resource_id,
                error = %lifecycle_error,
                "custom resource request failed"
            );
            let physical_resource_id = match event.request_type {
                RequestType::Create => context.log_stream_name.clone(),
                RequestType::Update | RequestType::Delete => {
                    existing_physical_id(event, context)
                }
            };
            CustomResourceResponse::failed(
                event,
                physical_resource_id,
                failure_reason(&lifecycle_error, context),
            )
        }
    }
}

/// Entry point for one Lambda invocation: decode, run, and report the
/// outcome to CloudFormation.
pub fn handle_custom_resource_event(
    payload: Value,
    context: &InvocationContext,
    api: &impl IdentityPoolApi,
    sender: &impl ResponseSender,
) -> Result<CustomResourceResponse, HandlerError> {
    let event: CustomResourceEvent = serde_json::from_value(payload)
        .map_err(|error| HandlerError::InvalidEvent(error.to_string()))?;

    info!(
        request_type = event.request_type.as_str(),
        request_id = %event.request_id,
        logical_resource_id = %event.logical_resource_id,
        physical_resource_id = event.physical_resource_id.as_deref().unwrap_or_default(),
        "custom resource request received"
    );

    let response = build_response(&event, context, api);
    sender.send_response(&event.response_url, &response)?;

    info!(
        status = ?response.status,
        physical_resource_id = %response.physical_resource_id,
        "custom resource response sent"
    );
    Ok(response)
}

fn existing_physical_id(event: &CustomResourceEvent, context: &InvocationContext) -> String {
    event
        .physical_resource_id
        .clone()
        .unwrap_or_else(|| context.log_stream_name.clone())
}

fn failure_reason(error: &LifecycleError, context: &InvocationContext) -> String {
    format!(
        "{error}. See the details in CloudWatch Log Stream: {}",
        context.log_stream_name
    )
}
