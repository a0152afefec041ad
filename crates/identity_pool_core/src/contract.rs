use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CloudFormation rejects response documents larger than this.
pub const MAX_RESPONSE_BYTES: usize = 4096;

pub const DATA_IDENTITY_POOL_ID: &str = "IdentityPoolId";
pub const DATA_IDENTITY_POOL_NAME: &str = "IdentityPoolName";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub no_echo: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl CustomResourceResponse {
    pub fn success(
        event: &CustomResourceEvent,
        physical_resource_id: impl Into<String>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: None,
            physical_resource_id: physical_resource_id.into(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data,
        }
    }

    /// Builds a `FAILED` response whose serialized form fits in
    /// [`MAX_RESPONSE_BYTES`]; the reason is shortened if needed.
    pub fn failed(
        event: &CustomResourceEvent,
        physical_resource_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let mut response = Self {
            status: ResponseStatus::Failed,
            reason: None,
            physical_resource_id: physical_resource_id.into(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data: Map::new(),
        };
        let envelope_len = response.to_json_bytes().len();
        // `"Reason":"",` plus room for escaping.
        let budget = MAX_RESPONSE_BYTES.saturating_sub(envelope_len + 64);
        response.reason = Some(truncate_reason(&reason.into(), budget));
        response
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    pub fn to_json_bytes(&self) -> Vec<u8> {
        // A struct of strings, bools and JSON values cannot fail to serialize.
        serde_json::to_vec(self).unwrap_or_default()
    }
}

pub fn identity_pool_data(identity_pool_id: &str, identity_pool_name: &str) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert(
        DATA_IDENTITY_POOL_ID.to_string(),
        Value::String(identity_pool_id.to_string()),
    );
    data.insert(
        DATA_IDENTITY_POOL_NAME.to_string(),
        Value::String(identity_pool_name.to_string()),
    );
    data
}

fn truncate_reason(reason: &str, max_bytes: usize) -> String {
    const ELLIPSIS: &str = "...";
    let escaped_len = serde_json::to_string(reason)
        .map(|text| text.len())
        .unwrap_or(reason.len());
    if escaped_len <= max_bytes {
        return reason.to_string();
    }

    let mut kept = String::new();
    let mut used = ELLIPSIS.len() + 2;
    for ch in reason.chars() {
        let encoded = escaped_char_len(ch);
        if used + encoded > max_bytes {
            break;
        }
        used += encoded;
        kept.push(ch);
    }
    kept.push_str(ELLIPSIS);
    kept
}

/// Upper bound of the bytes `ch` occupies inside a JSON string literal.
fn escaped_char_len(ch: char) -> usize {
    match ch {
        '"' | '\\' => 2,
        control if (control as u32) < 0x20 => 6,
        other => other.len_utf8(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_event() -> CustomResourceEvent {
        serde_json::from_value(json!({
            "RequestType": "Update",
            "ResponseURL": "https://cloudformation-custom-resource-response.s3.amazonaws.com/x",
            "StackId": "arn:aws:cloudformation:eu-west-1:123456789012:stack/app/guid",
            "RequestId": "request-1",
            "LogicalResourceId": "IdentityPool",
            "ResourceType": "Custom::IdentityPool",
            "PhysicalResourceId": "eu-west-1:bef2c0b3-f3ce-4de0-aec1-8765trfvbh",
            "ResourceProperties": {
                "ServiceToken": "arn:aws:lambda:eu-west-1:123456789012:function:pool",
                "IdentityPoolName": "IdentityPoolName",
                "AllowUnauthenticatedIdentities": "true"
            },
            "OldResourceProperties": {
                "IdentityPoolName": "Previous",
                "AllowUnauthenticatedIdentities": "false"
            }
        }))
        .expect("event should parse")
    }

    #[test]
    fn decodes_cloudformation_event_keys() {
        let event = sample_event();

        assert_eq!(event.request_type, RequestType::Update);
        assert!(event.response_url.starts_with("https://"));
        assert_eq!(
            event.physical_resource_id.as_deref(),
            Some("eu-west-1:bef2c0b3-f3ce-4de0-aec1-8765trfvbh")
        );
        assert_eq!(
            event.resource_properties.get("IdentityPoolName"),
            Some(&json!("IdentityPoolName"))
        );
        assert!(event.old_resource_properties.is_some());
    }

    #[test]
    fn create_event_has_no_physical_id() {
        let event: CustomResourceEvent = serde_json::from_value(json!({
            "RequestType": "Create",
            "ResponseURL": "https://example.com/response",
            "StackId": "stack",
            "RequestId": "request",
            "LogicalResourceId": "IdentityPool",
            "ResourceProperties": {}
        }))
        .expect("create event should parse");

        assert_eq!(event.request_type, RequestType::Create);
        assert_eq!(event.physical_resource_id, None);
    }

    #[test]
    fn success_response_serializes_contract_keys() {
        let event = sample_event();
        let response = CustomResourceResponse::success(
            &event,
            "eu-west-1:pool",
            identity_pool_data("eu-west-1:pool", "IdentityPoolName"),
        );

        let value: Value =
            serde_json::from_slice(&response.to_json_bytes()).expect("response should parse");
        assert_eq!(value["Status"], "SUCCESS");
        assert_eq!(value["PhysicalResourceId"], "eu-west-1:pool");
        assert_eq!(value["StackId"], event.stack_id.as_str());
        assert_eq!(value["RequestId"], "request-1");
        assert_eq!(value["LogicalResourceId"], "IdentityPool");
        assert_eq!(value["NoEcho"], false);
        assert_eq!(value["Data"]["IdentityPoolId"], "eu-west-1:pool");
        assert!(value.get("Reason").is_none());
    }

    #[test]
    fn failed_response_keeps_short_reason() {
        let response = CustomResourceResponse::failed(&sample_event(), "pool", "boom");

        assert!(!response.is_success());
        assert_eq!(response.reason.as_deref(), Some("boom"));
        assert!(response.data.is_empty());
    }

    #[test]
    fn failed_response_truncates_long_reason_under_limit() {
        let reason = "x\"".repeat(5_000);
        let response = CustomResourceResponse::failed(&sample_event(), "pool", reason);

        let bytes = response.to_json_bytes();
        assert!(bytes.len() <= MAX_RESPONSE_BYTES, "got {} bytes", bytes.len());
        assert!(response
            .reason
            .as_deref()
            .is_some_and(|text| text.ends_with("...")));
    }
}
