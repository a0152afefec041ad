use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const IDENTITY_POOL_NAME: &str = "IdentityPoolName";
pub const ALLOW_UNAUTHENTICATED_IDENTITIES: &str = "AllowUnauthenticatedIdentities";
pub const SERVICE_TOKEN: &str = "ServiceToken";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("Missing required property {0}")]
    MissingProperty(&'static str),
    #[error("Invalid resource properties: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CognitoIdentityProvider {
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub server_side_token_check: Option<bool>,
}

/// Resource properties as declared in the template, minus `ServiceToken`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct IdentityPoolProperties {
    #[serde(default)]
    pub identity_pool_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub allow_unauthenticated_identities: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub allow_classic_flow: Option<bool>,
    #[serde(default)]
    pub supported_login_providers: BTreeMap<String, String>,
    #[serde(default)]
    pub developer_provider_name: Option<String>,
    #[serde(default, rename = "OpenIdConnectProviderARNs")]
    pub open_id_connect_provider_arns: Vec<String>,
    #[serde(default)]
    pub cognito_identity_providers: Vec<CognitoIdentityProvider>,
    #[serde(default, rename = "SamlProviderARNs")]
    pub saml_provider_arns: Vec<String>,
    #[serde(default)]
    pub identity_pool_tags: BTreeMap<String, String>,
}

/// Properties that passed validation; the two required fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPoolSpec {
    pub identity_pool_name: String,
    pub allow_unauthenticated_identities: bool,
    pub allow_classic_flow: Option<bool>,
    pub supported_login_providers: BTreeMap<String, String>,
    pub developer_provider_name: Option<String>,
    pub open_id_connect_provider_arns: Vec<String>,
    pub cognito_identity_providers: Vec<CognitoIdentityProvider>,
    pub saml_provider_arns: Vec<String>,
    pub identity_pool_tags: BTreeMap<String, String>,
}

impl IdentityPoolProperties {
    pub fn from_resource_properties(
        properties: &Map<String, Value>,
    ) -> Result<Self, PropertyError> {
        let mut forwarded = properties.clone();
        forwarded.remove(SERVICE_TOKEN);
        serde_json::from_value(Value::Object(forwarded))
            .map_err(|error| PropertyError::Malformed(error.to_string()))
    }

    pub fn validate(&self) -> Result<(), PropertyError> {
        if self.allow_unauthenticated_identities.is_none() {
            return Err(PropertyError::MissingProperty(
                ALLOW_UNAUTHENTICATED_IDENTITIES,
            ));
        }
        if self
            .identity_pool_name
            .as_deref()
            .map_or(true, str::is_empty)
        {
            return Err(PropertyError::MissingProperty(IDENTITY_POOL_NAME));
        }
        Ok(())
    }

    pub fn into_spec(self) -> Result<IdentityPoolSpec, PropertyError> {
        let allow_unauthenticated_identities = self.allow_unauthenticated_identities.ok_or(
            PropertyError::MissingProperty(ALLOW_UNAUTHENTICATED_IDENTITIES),
        )?;
        let identity_pool_name = self
            .identity_pool_name
            .filter(|name| !name.is_empty())
            .ok_or(PropertyError::MissingProperty(IDENTITY_POOL_NAME))?;

        Ok(IdentityPoolSpec {
            identity_pool_name,
            allow_unauthenticated_identities,
            allow_classic_flow: self.allow_classic_flow,
            supported_login_providers: self.supported_login_providers,
            developer_provider_name: self.developer_provider_name,
            open_id_connect_provider_arns: self.open_id_connect_provider_arns,
            cognito_identity_providers: self.cognito_identity_providers,
            saml_provider_arns: self.saml_provider_arns,
            identity_pool_tags: self.identity_pool_tags,
        })
    }
}

/// Decodes and validates a `ResourceProperties` object in one step.
pub fn parse_identity_pool_spec(
    properties: &Map<String, Value>,
) -> Result<IdentityPoolSpec, PropertyError> {
    IdentityPoolProperties::from_resource_properties(properties)?.into_spec()
}

/// CloudFormation passes every scalar property as a string.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(flag)),
        Some(Value::String(text)) if text.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(Value::String(text)) if text.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a boolean or \"true\"/\"false\", got {other}"
        ))),
    }
}
