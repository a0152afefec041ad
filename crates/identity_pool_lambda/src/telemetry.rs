use tracing_subscriber::EnvFilter;

/// Installs the global JSON subscriber. CloudWatch stamps each line itself,
/// so timestamps and targets are left out.
pub fn init_tracing(filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_current_span(false)
        .try_init()
}
