use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

use aws_sdk_cognitoidentity::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentity::types::CognitoIdentityProvider;
use identity_pool_core::properties::{self, IdentityPoolSpec};

use crate::adapters::identity_pool::{IdentityPoolApi, IdentityPoolApiError};

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// [`IdentityPoolApi`] backed by the Cognito Identity service.
///
/// Calls block the current worker thread, so the Lambda runtime must run on
/// the multi-threaded tokio scheduler.
#[derive(Clone)]
pub struct CognitoIdentityPoolApi {
    client: aws_sdk_cognitoidentity::Client,
}

impl CognitoIdentityPoolApi {
    pub fn new(client: aws_sdk_cognitoidentity::Client) -> Self {
        Self { client }
    }
}

impl IdentityPoolApi for CognitoIdentityPoolApi {
    fn create_identity_pool(&self, spec: &IdentityPoolSpec) -> Result<String, IdentityPoolApiError> {
        let request = self
            .client
            .create_identity_pool()
            .identity_pool_name(spec.identity_pool_name.clone())
            .allow_unauthenticated_identities(spec.allow_unauthenticated_identities)
            .set_allow_classic_flow(spec.allow_classic_flow)
            .set_supported_login_providers(non_empty_map(&spec.supported_login_providers))
            .set_developer_provider_name(spec.developer_provider_name.clone())
            .set_open_id_connect_provider_arns(non_empty_vec(&spec.open_id_connect_provider_arns))
            .set_cognito_identity_providers(cognito_providers(
                &spec.cognito_identity_providers,
            ))
            .set_saml_provider_arns(non_empty_vec(&spec.saml_provider_arns))
            .set_identity_pool_tags(non_empty_map(&spec.identity_pool_tags));

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                request
                    .send()
                    .await
                    .map(|output| output.identity_pool_id().to_string())
                    .map_err(|error| classify_sdk_error("CreateIdentityPool", error))
            })
        })
    }

    fn update_identity_pool(
        &self,
        identity_pool_id: &str,
        spec: &IdentityPoolSpec,
    ) -> Result<(), IdentityPoolApiError> {
        let request = self
            .client
            .update_identity_pool()
            .identity_pool_id(identity_pool_id)
            .identity_pool_name(spec.identity_pool_name.clone())
            .allow_unauthenticated_identities(spec.allow_unauthenticated_identities)
            .set_allow_classic_flow(spec.allow_classic_flow)
            .set_supported_login_providers(non_empty_map(&spec.supported_login_providers))
            .set_developer_provider_name(spec.developer_provider_name.clone())
            .set_open_id_connect_provider_arns(non_empty_vec(&spec.open_id_connect_provider_arns))
            .set_cognito_identity_providers(cognito_providers(
                &spec.cognito_identity_providers,
            ))
            .set_saml_provider_arns(non_empty_vec(&spec.saml_provider_arns))
            .set_identity_pool_tags(non_empty_map(&spec.identity_pool_tags));

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                request
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| classify_sdk_error("UpdateIdentityPool", error))
            })
        })
    }

    fn delete_identity_pool(&self, identity_pool_id: &str) -> Result<(), IdentityPoolApiError> {
        let request = self
            .client
            .delete_identity_pool()
            .identity_pool_id(identity_pool_id);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                request
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| classify_sdk_error("DeleteIdentityPool", error))
            })
        })
    }
}

/// Service errors keep the service's own code and message; only transport,
/// timeout and request construction failures carry the SDK error chain.
fn classify_sdk_error<E, R>(operation: &str, error: SdkError<E, R>) -> IdentityPoolApiError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    let message = match error.as_service_error() {
        Some(service_error) => match (service_error.code(), service_error.message()) {
            (Some(code), Some(text)) => format!("{code}: {text}"),
            (Some(code), None) => code.to_string(),
            (None, Some(text)) => text.to_string(),
            (None, None) => service_error.to_string(),
        },
        None => format!("{operation} failed: {}", DisplayErrorContext(&error)),
    };

    if error.code() == Some(RESOURCE_NOT_FOUND) {
        IdentityPoolApiError::NotFound(message)
    } else {
        IdentityPoolApiError::Service(message)
    }
}

fn non_empty_map(values: &BTreeMap<String, String>) -> Option<HashMap<String, String>> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

fn non_empty_vec(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

fn cognito_providers(
    providers: &[properties::CognitoIdentityProvider],
) -> Option<Vec<CognitoIdentityProvider>> {
    if providers.is_empty() {
        return None;
    }
    Some(
        providers
            .iter()
            .map(|provider| {
                CognitoIdentityProvider::builder()
                    .set_provider_name(provider.provider_name.clone())
                    .set_client_id(provider.client_id.clone())
                    .set_server_side_token_check(provider.server_side_token_check)
                    .build()
            })
            .collect(),
    )
}
