//! Logger setup for binaries embedding a stage

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger, writing to stderr without timestamps
///
/// A `RUST_LOG` filter wins over `verbose`. Verbose output adds stage
/// bookkeeping at debug level, such as spawns, kills and superseded
/// interpolations. Calling this again is harmless: the logger installed
/// first stays in place.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose).to_string());
    let installed = Builder::from_env(env)
        .format_timestamp(None)
        .try_init()
        .is_ok();

    if !installed {
        log::trace!("global logger already set, keeping it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), LevelFilter::Debug);
        assert_eq!(default_filter(false), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
        log::info!("logger ready");
    }
}
