#![allow(dead_code)]

use serde_json::{json, Value};

pub const RESPONSE_URL: &str =
    "https://cloudformation-custom-resource-response-euwest1.s3.amazonaws.com/signed";
pub const POOL_ID: &str = "eu-west-1:bef2c0b3-f3ce-4de0-aec1-8765trfvbh";
pub const LOG_STREAM: &str = "2026/10/16/[$LATEST]9f0e1d2c3b4a59687766554433221100";

/// A CloudFormation event as the Lambda runtime delivers it; scalar
/// properties arrive as strings.
pub fn custom_resource_event(request_type: &str, physical_resource_id: Option<&str>) -> Value {
    let mut event = json!({
        "RequestType": request_type,
        "ResponseURL": RESPONSE_URL,
        "StackId": "arn:aws:cloudformation:eu-west-1:123456789012:stack/identity/8f6a2b40",
        "RequestId": "2b1c5d9e-4a3f-4e0b-9d7c-1f2e3d4c5b6a",
        "LogicalResourceId": "IdentityPool",
        "ResourceType": "Custom::CognitoIdentityPool",
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:eu-west-1:123456789012:function:identity-pool",
            "IdentityPoolName": "IdentityPoolName",
            "AllowUnauthenticatedIdentities": "true",
            "CognitoIdentityProviders": [
                {
                    "ProviderName": "cognito-idp.eu-west-1.amazonaws.com/eu-west-1_AbCdEf",
                    "ClientId": "4d6f1c2a3b",
                    "ServerSideTokenCheck": "false"
                }
            ],
            "IdentityPoolTags": {"stack": "identity"}
        }
    });
    if let Some(id) = physical_resource_id {
        event["PhysicalResourceId"] = json!(id);
    }
    if request_type == "Update" {
        event["OldResourceProperties"] = json!({
            "IdentityPoolName": "PreviousName",
            "AllowUnauthenticatedIdentities": "false"
        });
    }
    event
}
