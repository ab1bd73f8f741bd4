//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default filter level
///
/// `RUST_LOG` still takes precedence; `default_level` only applies to
/// modules the environment does not mention. Unknown level strings fall
/// back to `info`.
pub fn init(default_level: &str) {
    let level = parse_level(default_level);
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .try_init();
}

/// Parse a level name (`"trace"`, `"debug"`, ...) into a filter
pub fn parse_level(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), log::LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), log::LevelFilter::Warn);
        assert_eq!(parse_level("loud"), log::LevelFilter::Info);
    }
}
