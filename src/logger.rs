use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;

/// Formatting subscriber for the helper's request and failure events, up to
/// `level`, written through `writer`.
pub fn subscriber<W>(level: Level, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_level(true)
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(writer)
        .finish()
}

/// Installs [`subscriber`] on stderr as the global default.
///
/// Returns `false` when a global subscriber was already set; the existing one
/// stays in place.
pub fn init_logging(level: Level) -> bool {
    tracing::subscriber::set_global_default(subscriber(level, std::io::stderr)).is_ok()
}
