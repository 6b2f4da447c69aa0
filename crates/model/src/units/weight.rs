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

//! Weight units (base and storage: kilogram).

use std::sync::{Arc, OnceLock};

use rust_decimal_macros::dec;

use crate::{
    enums::UnitFamily,
    units::{CatalogEntry, DimensionCatalog, Unit},
};

static WEIGHT: OnceLock<WeightUnits> = OnceLock::new();

/// The weight catalog and its named units.
#[derive(Clone, Debug)]
pub struct WeightUnits {
    pub catalog: Arc<DimensionCatalog>,
    pub milligram: Unit,
    pub gram: Unit,
    pub kilogram: Unit,
    pub tonne: Unit,
    pub pound: Unit,
    pub ounce: Unit,
}

impl WeightUnits {
    /// Builds the weight catalog and its unit constants.
    #[must_use]
    pub fn initialize() -> Self {
        let catalog = DimensionCatalog::new(
            UnitFamily::Weight,
            "Kilogram",
            "Kilogram",
            vec![
                CatalogEntry::new("Milligram", "mg", dec!(0.000001)),
                CatalogEntry::new("Gram", "g", dec!(0.001)),
                CatalogEntry::new("Kilogram", "kg", dec!(1)),
                CatalogEntry::new("Tonne", "t", dec!(1000)),
                CatalogEntry::new("Pound", "lb", dec!(0.45359237)),
                CatalogEntry::new("Ounce", "oz", dec!(0.028349523125)),
            ],
        );

        Self {
            milligram: Unit::new(&catalog, "Milligram"),
            gram: Unit::new(&catalog, "Gram"),
            kilogram: Unit::new(&catalog, "Kilogram"),
            tonne: Unit::new(&catalog, "Tonne"),
            pound: Unit::new(&catalog, "Pound"),
            ounce: Unit::new(&catalog, "Ounce"),
            catalog,
        }
    }
}

/// Returns the process-wide weight units.
pub fn weight() -> &'static WeightUnits {
    WEIGHT.get_or_init(WeightUnits::initialize)
}
