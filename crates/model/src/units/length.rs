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

//! Length units (base: meter, stored in millimeters).

use std::sync::{Arc, OnceLock};

use rust_decimal_macros::dec;

use crate::{
    enums::UnitFamily,
    units::{CatalogEntry, DimensionCatalog, Unit},
};

static LENGTH: OnceLock<LengthUnits> = OnceLock::new();

/// The length catalog and its named units.
#[derive(Clone, Debug)]
pub struct LengthUnits {
    pub catalog: Arc<DimensionCatalog>,
    pub nanometer: Unit,
    pub millimeter: Unit,
    pub centimeter: Unit,
    pub meter: Unit,
    pub kilometer: Unit,
    pub inch: Unit,
    pub foot: Unit,
    pub yard: Unit,
    pub mile: Unit,
}

impl LengthUnits {
    /// Builds the length catalog and its unit constants.
    #[must_use]
    pub fn initialize() -> Self {
        let catalog = DimensionCatalog::new(
            UnitFamily::Length,
            "Meter",
            "Millimeter",
            vec![
                CatalogEntry::new("Nanometer", "nm", dec!(0.000000001)),
                CatalogEntry::new("Millimeter", "mm", dec!(0.001)),
                CatalogEntry::new("Centimeter", "cm", dec!(0.01)),
                CatalogEntry::new("Meter", "m", dec!(1)),
                CatalogEntry::new("Kilometer", "km", dec!(1000)),
                CatalogEntry::new("Inch", "in", dec!(0.0254)),
                CatalogEntry::new("Foot", "ft", dec!(0.3048)),
                CatalogEntry::new("Yard", "yd", dec!(0.9144)),
                CatalogEntry::new("Mile", "mi", dec!(1609.344)),
            ],
        );

        Self {
            nanometer: Unit::new(&catalog, "Nanometer"),
            millimeter: Unit::new(&catalog, "Millimeter"),
            centimeter: Unit::new(&catalog, "Centimeter"),
            meter: Unit::new(&catalog, "Meter"),
            kilometer: Unit::new(&catalog, "Kilometer"),
            inch: Unit::new(&catalog, "Inch"),
            foot: Unit::new(&catalog, "Foot"),
            yard: Unit::new(&catalog, "Yard"),
            mile: Unit::new(&catalog, "Mile"),
            catalog,
        }
    }
}

/// Returns the process-wide length units.
pub fn length() -> &'static LengthUnits {
    LENGTH.get_or_init(LengthUnits::initialize)
}
