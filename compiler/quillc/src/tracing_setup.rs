//! Tracing subscriber for the CLI.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set.
///
/// Call this once at startup. Safe to call multiple times. Filtering follows
/// `RUST_LOG` (e.g. `RUST_LOG=quill_eval=trace`). Setting `QUILL_LOG_TREE`
/// switches to indented, span-nested output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();

        if std::env::var_os("QUILL_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
