use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with file output.
///
/// Logging stays off unless a log file is given, since anything written to
/// the terminal would corrupt the UI. The filter comes from `RUST_LOG` and
/// defaults to `info`.
pub fn init_tracing(log_file: Option<&Path>) {
    let Some(path) = log_file else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to create log file {}: {}", path.display(), err);
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: failed to install log subscriber: {}", err);
    }
}
