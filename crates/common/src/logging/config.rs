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

//! Logging configuration types and parsing.
//!
//! # Spec String Format
//!
//! The `DATABUCKET_LOG` environment variable uses a semicolon-separated format:
//!
//! ```text
//! stdout=Info;databucket_model::units=Debug;is_colored
//! ```
//!
//! ## Supported Keys
//!
//! | Key              | Type      | Description                                 |
//! |------------------|-----------|---------------------------------------------|
//! | `stdout`         | Log level | Maximum level for stdout output.            |
//! | `is_colored`     | Boolean   | Enable ANSI colors (default: true).         |
//! | `print_config`   | Boolean   | Print config to stdout at startup.          |
//! | `<module::path>` | Log level | Module-specific log level (prefix match).   |
//!
//! Log levels (`Off`, `Error`, `Warn`, `Info`, `Debug`, `Trace`) are case-insensitive. A bare
//! flag such as `is_colored` means true; `false`, `0` and `no` switch a flag off.

use std::{env, str::FromStr};

use ahash::AHashMap;
use log::LevelFilter;
use ustr::Ustr;

/// The environment variable holding the logger spec string.
pub const LOG_ENV_VAR: &str = "DATABUCKET_LOG";

/// Configuration for the DataBucket logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Maximum log level for stdout output.
    pub stdout_level: LevelFilter,
    /// Per-module path log level overrides (prefix match).
    pub module_level: AHashMap<Ustr, LevelFilter>,
    /// Use ANSI color codes in output.
    pub is_colored: bool,
    /// Print configuration to stdout at startup.
    pub print_config: bool,
}

impl Default for LoggerConfig {
    /// Creates a new default [`LoggerConfig`] instance.
    fn default() -> Self {
        Self {
            stdout_level: LevelFilter::Info,
            module_level: AHashMap::new(),
            is_colored: true,
            print_config: false,
        }
    }
}

impl LoggerConfig {
    /// Creates a new [`LoggerConfig`] instance.
    #[must_use]
    pub fn new(
        stdout_level: LevelFilter,
        module_level: AHashMap<Ustr, LevelFilter>,
        is_colored: bool,
        print_config: bool,
    ) -> Self {
        Self {
            stdout_level,
            module_level,
            is_colored,
            print_config,
        }
    }

    /// Parses a configuration from a spec string.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec string contains an unknown flag, a key that is neither known
    /// nor a module path, or an invalid log level.
    pub fn from_spec(spec: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();

        for kv in spec.split(';') {
            let kv = kv.trim();
            if kv.is_empty() {
                continue;
            }

            let Some((k, v)) = kv.split_once('=') else {
                match kv.to_lowercase().as_str() {
                    "is_colored" => config.is_colored = true,
                    "print_config" => config.print_config = true,
                    _ => anyhow::bail!("Invalid spec pair: {kv}"),
                }
                continue;
            };

            let k = k.trim();
            let v = v.trim();

            match k.to_lowercase().as_str() {
                "is_colored" => config.is_colored = parse_bool_value(v),
                "print_config" => config.print_config = parse_bool_value(v),
                "stdout" => config.stdout_level = parse_level(v)?,
                _ if k.contains("::") || k.starts_with("databucket") => {
                    config.module_level.insert(Ustr::from(k), parse_level(v)?);
                }
                _ => anyhow::bail!("Invalid spec key: {k}"),
            }
        }

        Ok(config)
    }

    /// Parses configuration from the `DATABUCKET_LOG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or contains invalid syntax.
    pub fn from_env() -> anyhow::Result<Self> {
        let spec = env::var(LOG_ENV_VAR)?;
        Self::from_spec(&spec)
    }

    /// Returns the module filters sorted by descending path length, so the first prefix match
    /// is the longest.
    #[must_use]
    pub fn sorted_module_filters(&self) -> Vec<(Ustr, LevelFilter)> {
        let mut filters: Vec<(Ustr, LevelFilter)> = self
            .module_level
            .iter()
            .map(|(path, level)| (*path, *level))
            .collect();
        filters.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        filters
    }

    /// Returns the most verbose level any output of this configuration accepts.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        self.module_level
            .values()
            .copied()
            .fold(self.stdout_level, Ord::max)
    }
}

/// Parses a boolean value from a string.
///
/// Returns `true` unless the value is explicitly "false", "0", or "no" (case-insensitive).
fn parse_bool_value(v: &str) -> bool {
    !matches!(v.to_lowercase().as_str(), "false" | "0" | "no")
}

/// Parses a log level from a string.
fn parse_level(v: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(v).map_err(|_| anyhow::anyhow!("Invalid log level: {v}"))
}
