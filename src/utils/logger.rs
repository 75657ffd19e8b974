use crate::config::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "taxpayer_desk=debug,info"
    } else {
        "taxpayer_desk=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber, writing to stderr so stdout stays free for
/// command output. `Json` emits one object per line for a log collector.
pub fn init_logger(format: LogFormat, verbose: bool) {
    macro_rules! base_layer {
        () => {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
        };
    }

    let (compact, json) = match format {
        LogFormat::Compact => (Some(base_layer!().compact()), None),
        LogFormat::Json => (None, Some(base_layer!().json())),
    };

    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(compact)
        .with(json)
        .init();
}
