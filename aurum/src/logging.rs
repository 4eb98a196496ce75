use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// `RUST_LOG` directives, falling back to `INFO` when unset. Invalid directives are ignored.
fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Install human readable scanner logs.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .init()
}

/// Install one JSON object per event, with event fields (`instrument`, `strategy`, ..) flattened
/// to the top level for log shippers.
pub fn init_json_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().flatten_event(true))
        .init()
}
