use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins over the defaults.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,favicon_finder=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
