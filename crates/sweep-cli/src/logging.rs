//! Tracing subscriber setup.

use sweep_core::Verbosity;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives: `RUST_LOG` when set and non-empty, otherwise the level
/// implied by the verbosity flags.
pub fn filter_directives(verbosity: Verbosity, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => verbosity.level().to_string(),
    }
}

/// Install the global subscriber.
pub fn init(verbosity: Verbosity) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(filter_directives(verbosity, rust_log.as_deref()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init()?;
    Ok(())
}
