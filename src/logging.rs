//! Logger setup for binaries and tests that use this crate.
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,meta_datasets=info";

/// Initialise `env_logger` from `RUST_LOG`, falling back to `default_filter`.
///
/// `default_filter` uses the usual env_logger syntax, e.g.
/// `"warn,meta_datasets=debug"`. Safe to call more than once; later calls
/// are ignored.
pub fn init_logger(default_filter: &str) {
    let _ = env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("RUST_LOG", default_filter))
        .try_init();
}
