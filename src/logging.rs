//! Log setup for binaries built on the crate

use log::LevelFilter;

/// Installs `env_logger` with this crate at `info`. `RUST_LOG` still
/// overrides any module, and a logger that is already installed is kept.
pub fn init() {
    let installed = env_logger::Builder::new()
        .filter_module("bobamap", LevelFilter::Info)
        .parse_default_env()
        .try_init();

    if installed.is_err() {
        log::debug!("logger already installed; keeping it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_keeps_first_logger() {
        init();
        init();
        assert_ne!(log::max_level(), LevelFilter::Off);
    }
}
