pub mod config;

/// Install the global tracing subscriber. `RUST_LOG` overrides `default_filter`.
/// CLI tools log to stderr so their stdout stays clean.
pub fn init_tracing(default_filter: &str, to_stderr: bool) {
    let builder = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()),
    );

    if to_stderr {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.init();
    }
}
