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

//! Units of measure and the dimensional algebra over them.
//!
//! Each dimension family (length, weight, time, electric current, currency) owns one
//! [`DimensionCatalog`] built by its `initialize()`; the process-wide instances are reachable
//! through [`length()`], [`weight()`], [`time()`], [`electric_current()`] and [`currency()`].
//! Atomic [`Unit`]s compose into [`CombinedUnit`]s by multiplication and division, and
//! [`UnitRegistry`] looks units up by family, name, symbol or canonical expression.

pub mod any;
pub mod catalog;
pub mod combined;
pub mod currency;
pub mod current;
pub mod length;
pub mod registry;
pub mod time;
pub mod unit;
pub mod weight;

// Re-exports
pub use any::UnitAny;
pub use catalog::{CatalogEntry, DimensionCatalog};
pub use combined::CombinedUnit;
pub use currency::{CurrencyRateProvider, CurrencyUnits, currency};
pub use current::{ElectricCurrentUnits, electric_current};
pub use length::{LengthUnits, length};
pub use registry::UnitRegistry;
pub use time::{TimeUnits, time};
pub use unit::Unit;
pub use weight::{WeightUnits, weight};
