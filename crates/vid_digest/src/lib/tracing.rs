use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// filter; `verbose` lowers it to debug.
pub fn init_tracing_subscriber(verbose: bool) -> anyhow::Result<()> {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;

    Ok(())
}
