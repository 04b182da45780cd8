//! Tracing subscriber setup.
//!
//! Nothing is installed unless `UOS_LOG` or `RUST_LOG` is set, so a plain
//! run prints only script output. `UOS_LOG_TREE=1` swaps the flat formatter
//! for an indented span tree.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
///
/// Examples: `UOS_LOG=uos_eval=debug`, `UOS_LOG=uos_lexer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(filter) = env_filter() else {
            return;
        };
        if tree_enabled() {
            tracing_subscriber::registry()
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
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

fn env_filter() -> Option<EnvFilter> {
    let directives = std::env::var("UOS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()?;
    Some(EnvFilter::new(directives))
}

fn tree_enabled() -> bool {
    std::env::var("UOS_LOG_TREE").is_ok_and(|value| value == "1")
}
