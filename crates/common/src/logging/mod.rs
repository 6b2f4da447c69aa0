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

//! The logging framework for DataBucket.
//!
//! Library crates log through the `log` facade only. Binaries and tests install the
//! [`Logger`](logger::Logger) once, either explicitly with [`init_logging`] or lazily with
//! [`ensure_logging_initialized`], which reads the `DATABUCKET_LOG` environment variable.

pub mod config;
pub mod logger;

use std::{
    env,
    str::FromStr,
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

use log::LevelFilter;

// Re-exports
pub use self::{
    config::{LOG_ENV_VAR, LoggerConfig},
    logger::Logger,
};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);
static LOGGING_BYPASSED: AtomicBool = AtomicBool::new(false);
static LOGGING_COLORED: AtomicBool = AtomicBool::new(true);
static LAZY_INIT: OnceLock<bool> = OnceLock::new();

/// Returns whether the logger is installed.
pub fn logging_is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::Relaxed)
}

/// Ensures logging is initialized on first use.
///
/// If `DATABUCKET_LOG` is set and valid, initializes the logger with that config. Otherwise,
/// initializes with INFO level to stdout.
///
/// Returns `true` if logging is available (either already initialized or successfully
/// lazy-initialized), `false` otherwise.
pub fn ensure_logging_initialized() -> bool {
    if LOGGING_INITIALIZED.load(Ordering::SeqCst) {
        return true;
    }

    *LAZY_INIT.get_or_init(|| {
        let config = env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|spec| LoggerConfig::from_spec(&spec).ok())
            .unwrap_or_default();
        Logger::init_with_config(config).is_ok()
    }) || LOGGING_INITIALIZED.load(Ordering::SeqCst)
}

/// Sets the logging subsystem to bypass mode: every record is dropped.
pub fn logging_set_bypass() {
    LOGGING_BYPASSED.store(true, Ordering::Relaxed);
}

/// Returns whether the logger is using ANSI colors.
pub fn logging_is_colored() -> bool {
    LOGGING_COLORED.load(Ordering::Relaxed)
}

/// Initializes logging with the given configuration.
///
/// Should only be called once during an application's run, ideally at the beginning.
///
/// # Errors
///
/// Returns an error if a logger is already installed.
pub fn init_logging(config: LoggerConfig) -> anyhow::Result<()> {
    Logger::init_with_config(config)
}

/// Parses a string into a [`LevelFilter`].
///
/// # Errors
///
/// Returns an error if the provided string is not a valid `LevelFilter`.
pub fn parse_level_filter_str(s: &str) -> anyhow::Result<LevelFilter> {
    let upper = s.to_uppercase();
    LevelFilter::from_str(&upper).map_err(|_| anyhow::anyhow!("Invalid log level: {s}"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("DEBUG", LevelFilter::Debug)]
    #[case("debug", LevelFilter::Debug)]
    #[case("Warn", LevelFilter::Warn)]
    #[case("off", LevelFilter::Off)]
    fn test_parse_level_filter_str_case_insensitive(
        #[case] input: &str,
        #[case] expected: LevelFilter,
    ) {
        assert_eq!(parse_level_filter_str(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("LOUD")]
    fn test_parse_level_filter_str_invalid_returns_error(#[case] input: &str) {
        assert!(parse_level_filter_str(input).is_err());
    }

    #[rstest]
    fn test_ensure_logging_initialized_is_idempotent() {
        let first = ensure_logging_initialized();
        let second = ensure_logging_initialized();
        assert_eq!(first, second);
        assert_eq!(first, logging_is_initialized());
        log::info!("Logging available: {first}");
    }

    #[rstest]
    fn test_init_logging_twice_fails() {
        ensure_logging_initialized();
        assert!(init_logging(LoggerConfig::default()).is_err());
    }
}
