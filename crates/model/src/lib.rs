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

//! Unit algebra and typed, unit-aware values for DataBucket records.
//!
//! The crate is organized bottom-up:
//!
//! - [`units`]: dimension catalogs (length, weight, time, electric current, currency), atomic
//!   [`Unit`](units::Unit)s, composite [`CombinedUnit`](units::CombinedUnit)s and the
//!   [`UnitRegistry`](units::UnitRegistry) used to look units up by name or parse unit
//!   expressions.
//! - [`values`]: the closed [`Value`](values::Value) family (number, string, boolean, date,
//!   date-time) with arithmetic, comparison, casting and serialization.
//! - [`field`]: declarations of the record fields that produce values.
//!
//! Failures are reported as [`ModelError`](error::ModelError) and never panic, except for the
//! `new` constructors which are the panicking counterparts of `new_checked`.

#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]

pub mod enums;
pub mod error;
pub mod field;
pub mod types;
pub mod units;
pub mod values;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;
