use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a tracing filter, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "ROUTE_GRAPH_LOG";

/// Install a stderr subscriber. Defaults to `warn` when no filter is set.
pub fn init_tracing(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
