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

//! Core functionality for the DataBucket value layer.
//!
//! This crate holds the small, dependency-light building blocks shared by the other crates:
//!
//! - [`correctness`]: design-by-contract style checks returning `anyhow::Result`.
//! - [`datetime`]: ISO 8601 parsing and UNIX timestamp helpers.

#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]

pub mod correctness;
pub mod datetime;
