//! Driver library behind the `splc` binary.
//!
//! [`pipeline`] chains the phases and turns each phase error into a
//! [`Diagnostic`](spl_diagnostic::Diagnostic); [`commands`] renders results
//! for the terminal.

pub mod commands;
pub mod pipeline;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only active when `RUST_LOG` is set, e.g. `RUST_LOG=spl_parse=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .init();
        }
    });
}
