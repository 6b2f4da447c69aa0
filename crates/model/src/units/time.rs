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

//! Time units (base and storage: second).

use std::sync::{Arc, OnceLock};

use rust_decimal_macros::dec;

use crate::{
    enums::UnitFamily,
    units::{CatalogEntry, DimensionCatalog, Unit},
};

static TIME: OnceLock<TimeUnits> = OnceLock::new();

/// The time catalog and its named units.
///
/// A month is 1/12 of a 365-day year and a year is exactly 365 days.
#[derive(Clone, Debug)]
pub struct TimeUnits {
    pub catalog: Arc<DimensionCatalog>,
    pub nanosecond: Unit,
    pub microsecond: Unit,
    pub millisecond: Unit,
    pub second: Unit,
    pub minute: Unit,
    pub hour: Unit,
    pub day: Unit,
    pub week: Unit,
    pub month: Unit,
    pub year: Unit,
}

impl TimeUnits {
    /// Builds the time catalog and its unit constants.
    #[must_use]
    pub fn initialize() -> Self {
        let catalog = DimensionCatalog::new(
            UnitFamily::Time,
            "Second",
            "Second",
            vec![
                CatalogEntry::new("Nanosecond", "ns", dec!(0.000000001)),
                CatalogEntry::new("Microsecond", "µs", dec!(0.000001)),
                CatalogEntry::new("Millisecond", "ms", dec!(0.001)),
                CatalogEntry::new("Second", "s", dec!(1)),
                CatalogEntry::new("Minute", "min", dec!(60)),
                CatalogEntry::new("Hour", "h", dec!(3600)),
                CatalogEntry::new("Day", "d", dec!(86400)),
                CatalogEntry::new("Week", "w", dec!(604800)),
                CatalogEntry::new("Month", "mo", dec!(2628000)),
                CatalogEntry::new("Year", "y", dec!(31536000)),
            ],
        );

        Self {
            nanosecond: Unit::new(&catalog, "Nanosecond"),
            microsecond: Unit::new(&catalog, "Microsecond"),
            millisecond: Unit::new(&catalog, "Millisecond"),
            second: Unit::new(&catalog, "Second"),
            minute: Unit::new(&catalog, "Minute"),
            hour: Unit::new(&catalog, "Hour"),
            day: Unit::new(&catalog, "Day"),
            week: Unit::new(&catalog, "Week"),
            month: Unit::new(&catalog, "Month"),
            year: Unit::new(&catalog, "Year"),
            catalog,
        }
    }
}

/// Returns the process-wide time units.
pub fn time() -> &'static TimeUnits {
    TIME.get_or_init(TimeUnits::initialize)
}
