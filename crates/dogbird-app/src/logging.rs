//! Logger bootstrap.

use std::env;

use env_logger::{Builder, Env, DEFAULT_FILTER_ENV};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages are printed. Otherwise only info
/// level and above are shown. `RUST_LOG` overrides either default.
pub fn init(verbose: bool) {
    // The logger itself passes debug; verbosity is the global max level so
    // it can still be raised after start-up.
    let env = Env::default().default_filter_or(LevelFilter::Debug.to_string());
    let mut builder = Builder::from_env(env);

    // Only fails if a logger is already installed; repeated calls are fine.
    let _ = builder.try_init();
    set_verbose(verbose);
}

/// Switches between info and debug output. No effect when `RUST_LOG` is set.
pub fn set_verbose(verbose: bool) {
    if env::var_os(DEFAULT_FILTER_ENV).is_some() {
        return;
    }
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
}
