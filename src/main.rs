//! UCI engine binary: reads commands from stdin and answers on stdout. Logs go
//! to stderr, filtered by `RUST_LOG` (`warn` by default).

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    info!(
        version = %rookery::engine_version(),
        features = rookery::FEATURES,
        "starting UCI loop"
    );

    let mut engine = rookery::Engine::new();
    engine.uci_loop(&mut io::stdin().lock(), &mut io::stdout().lock())
}
