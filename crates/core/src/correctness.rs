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

//! Functions for correctness checks similar to the *design by contract* philosophy.
//!
//! Each check returns an [`anyhow::Result`] describing the violated condition, so callers can
//! either propagate the error from a `new_checked` constructor or panic with [`FAILED`] from
//! the matching `new` constructor.

use std::{collections::HashSet, fmt::Display, hash::Hash};

use rust_decimal::Decimal;

/// A message prefix that can be used with calls to `expect` or other assertion-related functions.
pub const FAILED: &str = "Condition failed";

/// Checks the `predicate` is true.
///
/// # Errors
///
/// Returns an error with `fail_msg` if the check fails.
#[inline(always)]
pub fn check_predicate_true(predicate: bool, fail_msg: &str) -> anyhow::Result<()> {
    if !predicate {
        anyhow::bail!("{fail_msg}")
    }
    Ok(())
}

/// Checks the string `s` is not empty and is not only whitespace.
///
/// # Errors
///
/// Returns an error if the check fails.
#[inline(always)]
pub fn check_valid_string<T: AsRef<str>>(s: T, param: &str) -> anyhow::Result<()> {
    let s = s.as_ref();
    if s.is_empty() {
        anyhow::bail!("invalid string for '{param}', was empty")
    }
    if s.chars().all(char::is_whitespace) {
        anyhow::bail!("invalid string for '{param}', was all whitespace")
    }
    Ok(())
}

/// Checks the `u8` value is within the inclusive range [`l`, `r`].
///
/// # Errors
///
/// Returns an error if the check fails.
#[inline(always)]
pub fn check_in_range_inclusive_u8(value: u8, l: u8, r: u8, param: &str) -> anyhow::Result<()> {
    if value < l || value > r {
        anyhow::bail!("invalid u8 for '{param}' not in range [{l}, {r}], was {value}")
    }
    Ok(())
}

/// Checks the decimal `value` is strictly positive (> 0).
///
/// # Errors
///
/// Returns an error if the check fails.
#[inline(always)]
pub fn check_positive_decimal(value: Decimal, param: &str) -> anyhow::Result<()> {
    if value <= Decimal::ZERO {
        anyhow::bail!("invalid Decimal for '{param}' not positive, was {value}")
    }
    Ok(())
}

/// Checks every item yielded by `items` is distinct.
///
/// # Errors
///
/// Returns an error naming the first duplicate if the check fails.
pub fn check_all_unique<I, T>(items: I, param: &str) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    for item in items {
        if seen.contains(&item) {
            anyhow::bail!("invalid '{param}', duplicate entry {item}")
        }
        seen.insert(item);
    }
    Ok(())
}
