// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use std::{
    fmt::Display,
    io::{self, Write},
    sync::atomic::Ordering,
};

use chrono::{DateTime, SecondsFormat, Utc};
use log::{Level, LevelFilter, Log, set_boxed_logger, set_max_level};
use ustr::Ustr;

pub use super::config::LoggerConfig;
use super::{LOGGING_BYPASSED, LOGGING_COLORED, LOGGING_INITIALIZED};

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";

/// A logger writing formatted lines to stdout, and errors to stderr.
///
/// Lines are filtered by the stdout level of the [`LoggerConfig`] unless a module filter matches
/// the record target, in which case the longest matching module path decides.
#[derive(Debug)]
pub struct Logger {
    /// Configuration for the logger.
    pub config: LoggerConfig,
    module_filters: Vec<(Ustr, LevelFilter)>,
}

/// Represents a single log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    /// The timestamp for the event.
    pub timestamp: DateTime<Utc>,
    /// The log level for the event.
    pub level: Level,
    /// The module path the log event originated from.
    pub target: Ustr,
    /// The log message content.
    pub message: String,
}

impl LogLine {
    /// Returns the plain log line, terminated by a newline.
    #[must_use]
    pub fn to_plain(&self) -> String {
        format!(
            "{} [{}] {}: {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            self.level,
            self.target,
            self.message,
        )
    }

    /// Returns the log line with ANSI color codes, terminated by a newline.
    #[must_use]
    pub fn to_colored(&self) -> String {
        format!(
            "{ANSI_BOLD}{}{ANSI_RESET} {}[{}] {}: {}{ANSI_RESET}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            level_ansi(self.level),
            self.level,
            self.target,
            self.message,
        )
    }
}

impl Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.target, self.message)
    }
}

/// Returns the ANSI color code for a log level.
#[must_use]
pub const fn level_ansi(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[1;31m",
        Level::Warn => "\x1b[1;33m",
        Level::Info => "",
        Level::Debug => "\x1b[94m",
        Level::Trace => "\x1b[90m",
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !LOGGING_BYPASSED.load(Ordering::Relaxed)
            && !should_filter_log(
                metadata.target(),
                metadata.level(),
                self.config.stdout_level,
                &self.module_filters,
            )
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine {
            timestamp: Utc::now(),
            level: record.level(),
            target: Ustr::from(record.target()),
            message: record.args().to_string(),
        };
        let text = if self.config.is_colored {
            line.to_colored()
        } else {
            line.to_plain()
        };

        let result = if line.level == Level::Error {
            io::stderr().lock().write_all(text.as_bytes())
        } else {
            io::stdout().lock().write_all(text.as_bytes())
        };
        if let Err(e) = result {
            eprintln!("Error writing log line: {e}");
        }
    }

    fn flush(&self) {
        if LOGGING_BYPASSED.load(Ordering::Relaxed) {
            return;
        }
        if let Err(e) = io::stdout().flush() {
            eprintln!("Error flushing stdout: {e}");
        }
    }
}

impl Logger {
    /// Creates a new [`Logger`] instance.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        let module_filters = config.sorted_module_filters();
        Self {
            config,
            module_filters,
        }
    }

    /// Initializes the logger from the `DATABUCKET_LOG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or invalid, or a logger is already installed.
    pub fn init_with_env() -> anyhow::Result<()> {
        let config = LoggerConfig::from_env()?;
        Self::init_with_config(config)
    }

    /// Installs a logger with the given configuration as the global `log` logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger is already installed.
    pub fn init_with_config(config: LoggerConfig) -> anyhow::Result<()> {
        let print_config = config.print_config;
        if print_config {
            println!("STATIC_MAX_LEVEL={}", log::STATIC_MAX_LEVEL);
            println!("Logger(config={config:?})");
        }

        let max_level = config.max_level();
        let is_colored = config.is_colored;

        set_boxed_logger(Box::new(Self::new(config)))
            .map_err(|e| anyhow::anyhow!("Cannot set logger: {e}"))?;
        set_max_level(max_level);

        LOGGING_COLORED.store(is_colored, Ordering::Relaxed);
        LOGGING_INITIALIZED.store(true, Ordering::SeqCst);

        if print_config {
            println!("Logger initialized with max level {max_level}");
        }
        Ok(())
    }
}

/// Determines if a log line should be filtered out.
///
/// Returns `true` if the line should be skipped, `false` if it should be logged.
///
/// The `module_filters_sorted` slice must be pre-sorted by descending path length so the
/// first `starts_with` match is the longest prefix. A matching module filter replaces the
/// `stdout_level`.
#[must_use]
pub fn should_filter_log(
    target: &str,
    line_level: Level,
    stdout_level: LevelFilter,
    module_filters_sorted: &[(Ustr, LevelFilter)],
) -> bool {
    let filter_level = module_filters_sorted
        .iter()
        .find(|(path, _)| target.starts_with(path.as_str()))
        .map_or(stdout_level, |(_, level)| *level);

    line_level > filter_level
}
