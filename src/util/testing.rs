use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// One-time setup shared by unit and integration tests: global tracing
/// subscriber and plain (uncolored) terminal output.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        colored::control::set_override(false);
        setup_test_logging();
    });
}

fn setup_test_logging() {
    let noisy_modules = ["rand"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // RUST_LOG wins; otherwise trace everything from this crate
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bstree=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("keeping existing subscriber");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("test logging unavailable: {}", e);
    }
}
