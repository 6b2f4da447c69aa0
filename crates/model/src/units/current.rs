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

//! Electric current units (base and storage: ampere).

use std::sync::{Arc, OnceLock};

use rust_decimal_macros::dec;

use crate::{
    enums::UnitFamily,
    units::{CatalogEntry, DimensionCatalog, Unit},
};

static ELECTRIC_CURRENT: OnceLock<ElectricCurrentUnits> = OnceLock::new();

/// The electric current catalog and its named units.
#[derive(Clone, Debug)]
pub struct ElectricCurrentUnits {
    pub catalog: Arc<DimensionCatalog>,
    pub nanoampere: Unit,
    pub microampere: Unit,
    pub milliampere: Unit,
    pub ampere: Unit,
    pub kiloampere: Unit,
    pub megaampere: Unit,
}

impl ElectricCurrentUnits {
    /// Builds the electric current catalog and its unit constants.
    #[must_use]
    pub fn initialize() -> Self {
        let catalog = DimensionCatalog::new(
            UnitFamily::ElectricCurrent,
            "Ampere",
            "Ampere",
            vec![
                CatalogEntry::new("Nanoampere", "nA", dec!(0.000000001)),
                CatalogEntry::new("Microampere", "µA", dec!(0.000001)),
                CatalogEntry::new("Milliampere", "mA", dec!(0.001)),
                CatalogEntry::new("Ampere", "A", dec!(1)),
                CatalogEntry::new("Kiloampere", "kA", dec!(1000)),
                CatalogEntry::new("Megaampere", "MA", dec!(1000000)),
            ],
        );

        Self {
            nanoampere: Unit::new(&catalog, "Nanoampere"),
            microampere: Unit::new(&catalog, "Microampere"),
            milliampere: Unit::new(&catalog, "Milliampere"),
            ampere: Unit::new(&catalog, "Ampere"),
            kiloampere: Unit::new(&catalog, "Kiloampere"),
            megaampere: Unit::new(&catalog, "Megaampere"),
            catalog,
        }
    }
}

/// Returns the process-wide electric current units.
pub fn electric_current() -> &'static ElectricCurrentUnits {
    ELECTRIC_CURRENT.get_or_init(ElectricCurrentUnits::initialize)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    fn test_symbols_are_case_sensitive() {
        let current = electric_current();
        assert_eq!(current.catalog.unit("mA").unwrap(), current.milliampere);
        assert_eq!(current.catalog.unit("MA").unwrap(), current.megaampere);
    }

    #[rstest]
    fn test_megaampere_to_milliampere() {
        let current = electric_current();
        let (factor, _) = current.megaampere.convert(&current.milliampere).unwrap();
        assert_eq!(factor, dec!(1000000000));
    }
}
