#![cfg(feature = "std")]

use std::env;
use std::io::{self, Write};
use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "BATTLESHIPS_LOG";

/// Writes engine records to stdout, one line each, tagged with the module
/// they came from.
struct StdoutLogger {
    level: LevelFilter,
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let module = record
            .target()
            .rsplit("::")
            .next()
            .unwrap_or_else(|| record.target());
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{:<5} {:>8}: {}", record.level(), module, record.args());
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<StdoutLogger> = OnceLock::new();

/// Parse a level name, falling back to `info` for unset or unknown values.
fn level_from(value: Option<String>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stdout logger with the level named in `BATTLESHIPS_LOG` and
/// return the level in effect. Later calls keep the first logger.
pub fn init_logging() -> LevelFilter {
    let logger = LOGGER.get_or_init(|| StdoutLogger {
        level: level_from(env::var(LOG_ENV).ok()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
    logger.level
}
