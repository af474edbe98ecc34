use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize tracing with structured logging. Actions log groups are emitted
/// separately as workflow commands; this covers everything else.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    Ok(())
}

/// Correlation ID linking the log lines of one orchestration run.
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}
