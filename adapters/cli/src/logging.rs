//! Logger initialisation.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises the global logger.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug output and
/// the default is info.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // Fails only when a logger is already installed.
    let _ = Builder::from_env(env).try_init();
}
