//! Tracing subscriber setup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a global subscriber for the evaluator's spans and events.
///
/// Does nothing unless `RUST_LOG` is set. With `TALA_LOG_TREE` set, output
/// is indented by span nesting, which follows the call structure of the
/// program being run. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let tree = std::env::var_os("TALA_LOG_TREE").is_some();
        let hierarchical = tree.then(|| {
            HierarchicalLayer::new(2)
                .with_targets(true)
                .with_indent_lines(true)
        });
        let flat = (!tree).then(|| fmt::layer().with_target(true).with_level(true));

        let installed = tracing_subscriber::registry()
            .with(hierarchical)
            .with(flat)
            .with(EnvFilter::from_default_env())
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global subscriber is already installed");
        }
    });
}
