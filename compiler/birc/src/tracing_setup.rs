//! Tracing subscriber installation.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Filter directives for the interpreter.
pub const LOG_ENV: &str = "BIR_LOG";

/// Any value switches output to the hierarchical span tree.
pub const LOG_TREE_ENV: &str = "BIR_LOG_TREE";

/// Install the global subscriber.
///
/// Safe to call more than once. Nothing is installed unless `BIR_LOG` or
/// `RUST_LOG` is set, so a plain run pays no logging cost.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let Some(directives) = filter_directives(
            std::env::var(LOG_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
        ) else {
            return;
        };
        let filter = EnvFilter::new(directives);

        if std::env::var_os(LOG_TREE_ENV).is_some() {
            tracing_subscriber::registry()
                .with(HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// `BIR_LOG` wins over `RUST_LOG`; blank values count as unset.
pub fn filter_directives(bir_log: Option<String>, rust_log: Option<String>) -> Option<String> {
    [bir_log, rust_log]
        .into_iter()
        .flatten()
        .find(|directives| !directives.trim().is_empty())
}
