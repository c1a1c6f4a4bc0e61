//! Logging initialisation on top of env_logger

use std::io::{IsTerminal, Write};

/// ANSI color code and padded label for a log level.
fn level_style(level: log::Level, color: bool) -> (&'static str, &'static str, &'static str) {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return ("", label, "");
    }
    let ansi = match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    };
    (ansi, label, "\x1b[0m")
}

/// Default filter for the given verbosity flags. `debug` wins over `quiet`.
fn default_level(quiet: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` overrides the level chosen from `quiet` / `debug`. Colors are
/// only emitted when stderr is a terminal. Calling this more than once keeps
/// the first logger.
pub fn init_logging(quiet: bool, debug: bool) {
    let color = std::io::stderr().is_terminal();

    let env = env_logger::Env::default().default_filter_or(default_level(quiet, debug));
    let result = env_logger::Builder::from_env(env)
        .format(move |buf, record| {
            let (pre, label, post) = level_style(record.level(), color);
            writeln!(buf, "[{pre}{label}{post}] {}", record.args())
        })
        .try_init();

    if result.is_err() {
        log::debug!("logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_labels_are_padded() {
        for level in [
            log::Level::Error,
            log::Level::Warn,
            log::Level::Info,
            log::Level::Debug,
            log::Level::Trace,
        ] {
            let (_, label, _) = level_style(level, false);
            assert_eq!(label.len(), 5);
        }
    }

    #[test]
    fn no_color_has_no_escape_codes() {
        let (pre, _, post) = level_style(log::Level::Error, false);
        assert!(pre.is_empty());
        assert!(post.is_empty());
    }

    #[test]
    fn debug_overrides_quiet() {
        assert_eq!(default_level(true, true), "debug");
        assert_eq!(default_level(true, false), "warn");
        assert_eq!(default_level(false, false), "info");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(true, false);
        init_logging(false, true);
    }
}
