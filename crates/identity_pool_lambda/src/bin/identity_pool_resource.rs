use identity_pool_core::contract::CustomResourceResponse;
use identity_pool_lambda::adapters::cognito::CognitoIdentityPoolApi;
use identity_pool_lambda::adapters::response::HttpResponseSender;
use identity_pool_lambda::config::RuntimeConfig;
use identity_pool_lambda::handlers::lifecycle::{handle_custom_resource_event, InvocationContext};
use identity_pool_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::error;

#[derive(Clone)]
struct RuntimeDependencies {
    identity_pools: CognitoIdentityPoolApi,
    response_sender: HttpResponseSender,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: RuntimeDependencies,
) -> Result<CustomResourceResponse, Error> {
    let (payload, context) = event.into_parts();
    let invocation = InvocationContext {
        log_stream_name: context.env_config.log_stream.clone(),
    };

    handle_custom_resource_event(
        payload,
        &invocation,
        &deps.identity_pools,
        &deps.response_sender,
    )
    .map_err(|handler_error| {
        error!(error = %handler_error, "custom resource invocation failed");
        Error::from(handler_error.to_string())
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = RuntimeConfig::from_env()?;
    init_tracing(&config.log_filter)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        identity_pools: CognitoIdentityPoolApi::new(aws_sdk_cognitoidentity::Client::new(
            &aws_config,
        )),
        response_sender: HttpResponseSender::new(config.response_timeout)?,
    };

    lambda_runtime::run(service_fn(move |event| handle_request(event, deps.clone()))).await
}
