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

//! Per-family dimension catalogs.
//!
//! A [`DimensionCatalog`] maps every atomic unit of one [`UnitFamily`] to its scalar factor
//! relative to the family base unit (whose factor is exactly 1). Catalogs are built once,
//! shared behind an [`Arc`] with every [`Unit`] of the family, and never mutated afterwards.

use std::{fmt::Debug, sync::Arc};

use databucket_core::correctness::{
    FAILED, check_all_unique, check_positive_decimal, check_predicate_true, check_valid_string,
};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use ustr::Ustr;

use crate::{
    enums::UnitFamily,
    error::{ModelError, ModelResult},
    units::Unit,
};

/// One row of a catalog factor table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The unit name, unique within the family (e.g. "Meter").
    pub name: Ustr,
    /// The display symbol (e.g. "m").
    pub symbol: Ustr,
    /// The factor relative to the family base unit.
    pub factor: Decimal,
}

impl CatalogEntry {
    /// Creates a new [`CatalogEntry`] instance.
    #[must_use]
    pub fn new(name: &str, symbol: &str, factor: Decimal) -> Self {
        Self {
            name: Ustr::from(name),
            symbol: Ustr::from(symbol),
            factor,
        }
    }
}

/// The factor table of one dimension family.
#[derive(Debug, PartialEq, Eq)]
pub struct DimensionCatalog {
    family: UnitFamily,
    base_unit: Ustr,
    storage_unit: Ustr,
    entries: IndexMap<Ustr, CatalogEntry>,
}

impl DimensionCatalog {
    /// Creates a new [`DimensionCatalog`] instance with correctness checking.
    ///
    /// `base_unit` is the unit whose factor is 1; `storage_unit` is the unit persisted values of
    /// this family are normalized to.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any name or symbol is empty, or any factor is not positive.
    /// - Names or symbols are not unique.
    /// - `base_unit` is missing or its factor is not exactly 1.
    /// - `storage_unit` is missing.
    pub fn new_checked(
        family: UnitFamily,
        base_unit: &str,
        storage_unit: &str,
        entries: Vec<CatalogEntry>,
    ) -> anyhow::Result<Arc<Self>> {
        for entry in &entries {
            check_valid_string(entry.name, "name")?;
            check_valid_string(entry.symbol, "symbol")?;
            check_positive_decimal(entry.factor, "factor")?;
        }
        check_all_unique(entries.iter().map(|e| e.name), "names")?;
        check_all_unique(entries.iter().map(|e| e.symbol), "symbols")?;

        let entries: IndexMap<Ustr, CatalogEntry> =
            entries.into_iter().map(|e| (e.name, e)).collect();

        let base = entries
            .get(&Ustr::from(base_unit))
            .ok_or_else(|| anyhow::anyhow!("base unit '{base_unit}' not in {family} catalog"))?;
        check_predicate_true(
            base.factor == Decimal::ONE,
            &format!(
                "base unit '{base_unit}' of {family} catalog must have factor 1, was {}",
                base.factor
            ),
        )?;
        check_predicate_true(
            entries.contains_key(&Ustr::from(storage_unit)),
            &format!("storage unit '{storage_unit}' not in {family} catalog"),
        )?;

        log::debug!(
            "Initialized {family} catalog with {} units (base={base_unit}, storage={storage_unit})",
            entries.len()
        );

        Ok(Arc::new(Self {
            family,
            base_unit: Ustr::from(base_unit),
            storage_unit: Ustr::from(storage_unit),
            entries,
        }))
    }

    /// Creates a new [`DimensionCatalog`] instance.
    ///
    /// # Panics
    ///
    /// Panics if any of the [`DimensionCatalog::new_checked`] checks fail.
    #[must_use]
    pub fn new(
        family: UnitFamily,
        base_unit: &str,
        storage_unit: &str,
        entries: Vec<CatalogEntry>,
    ) -> Arc<Self> {
        Self::new_checked(family, base_unit, storage_unit, entries).expect(FAILED)
    }

    #[must_use]
    pub fn family(&self) -> UnitFamily {
        self.family
    }

    #[must_use]
    pub fn base_unit_name(&self) -> &str {
        self.base_unit.as_str()
    }

    #[must_use]
    pub fn storage_unit_name(&self) -> &str {
        self.storage_unit.as_str()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Returns the factor of the unit named `name`, if present.
    #[must_use]
    pub fn factor(&self, name: &str) -> Option<Decimal> {
        self.entry(name).map(|e| e.factor)
    }

    /// Returns the entry for the exact unit `name`, if present.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(&Ustr::from(name))
    }

    /// Finds an entry by exact symbol, then by case-insensitive name.
    #[must_use]
    pub fn find(&self, name_or_symbol: &str) -> Option<&CatalogEntry> {
        let token = name_or_symbol.trim();
        self.entries
            .values()
            .find(|e| e.symbol.as_str() == token)
            .or_else(|| {
                self.entries
                    .values()
                    .find(|e| e.name.as_str().eq_ignore_ascii_case(token))
            })
    }

    /// Returns the unit for `name_or_symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidUnitType`] if no unit of this family matches.
    pub fn unit(self: &Arc<Self>, name_or_symbol: &str) -> ModelResult<Unit> {
        let entry = self.find(name_or_symbol).ok_or_else(|| {
            ModelError::InvalidUnitType(format!(
                "'{name_or_symbol}' is not a unit of the {} family",
                self.family
            ))
        })?;
        Ok(Unit::from_entry(self, entry))
    }

    /// Returns the base unit (factor 1).
    #[must_use]
    pub fn base_unit(self: &Arc<Self>) -> Unit {
        self.required_unit(self.base_unit)
    }

    /// Returns the unit persisted values of this family are normalized to.
    #[must_use]
    pub fn storage_unit(self: &Arc<Self>) -> Unit {
        self.required_unit(self.storage_unit)
    }

    /// Returns every unit of the family in declaration order.
    #[must_use]
    pub fn units(self: &Arc<Self>) -> Vec<Unit> {
        self.entries
            .values()
            .map(|entry| Unit::from_entry(self, entry))
            .collect()
    }

    fn required_unit(self: &Arc<Self>, name: Ustr) -> Unit {
        // Presence of the base and storage units is checked on construction
        let entry = self.entries.get(&name).expect(FAILED);
        Unit::from_entry(self, entry)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("Milliampere", "mA", dec!(0.001)),
            CatalogEntry::new("Ampere", "A", dec!(1)),
            CatalogEntry::new("Kiloampere", "kA", dec!(1000)),
        ]
    }

    #[rstest]
    fn test_new_checked_valid() {
        let catalog =
            DimensionCatalog::new_checked(UnitFamily::ElectricCurrent, "Ampere", "Milliampere", entries())
                .unwrap();
        assert_eq!(catalog.family(), UnitFamily::ElectricCurrent);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.base_unit_name(), "Ampere");
        assert_eq!(catalog.storage_unit_name(), "Milliampere");
        assert_eq!(catalog.factor("Kiloampere"), Some(dec!(1000)));
        assert_eq!(catalog.factor("Megaampere"), None);
        assert_eq!(catalog.base_unit().symbol(), "A");
        assert_eq!(catalog.storage_unit().symbol(), "mA");
    }

    #[rstest]
    fn test_new_checked_missing_base() {
        let err = DimensionCatalog::new_checked(UnitFamily::ElectricCurrent, "Volt", "Ampere", entries())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "base unit 'Volt' not in ELECTRIC_CURRENT catalog"
        );
    }

    #[rstest]
    fn test_new_checked_base_factor_not_one() {
        let result = DimensionCatalog::new_checked(
            UnitFamily::ElectricCurrent,
            "Kiloampere",
            "Ampere",
            entries(),
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn test_new_checked_missing_storage() {
        let result =
            DimensionCatalog::new_checked(UnitFamily::ElectricCurrent, "Ampere", "Microampere", entries());
        assert!(result.is_err());
    }

    #[rstest]
    fn test_new_checked_duplicate_symbol() {
        let mut entries = entries();
        entries.push(CatalogEntry::new("Other", "A", dec!(2)));
        let err = DimensionCatalog::new_checked(UnitFamily::ElectricCurrent, "Ampere", "Ampere", entries)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid 'symbols', duplicate entry A");
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-1))]
    fn test_new_checked_non_positive_factor(#[case] factor: Decimal) {
        let mut entries = entries();
        entries.push(CatalogEntry::new("Broken", "B", factor));
        assert!(
            DimensionCatalog::new_checked(UnitFamily::ElectricCurrent, "Ampere", "Ampere", entries)
                .is_err()
        );
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_new_panics_on_invalid_table() {
        let _ = DimensionCatalog::new(UnitFamily::ElectricCurrent, "Volt", "Ampere", entries());
    }

    #[rstest]
    #[case("mA", "Milliampere")]
    #[case("Kiloampere", "Kiloampere")]
    #[case("kiloampere", "Kiloampere")]
    #[case(" A ", "Ampere")]
    fn test_find(#[case] token: &str, #[case] expected: &str) {
        let catalog = DimensionCatalog::new(UnitFamily::ElectricCurrent, "Ampere", "Ampere", entries());
        assert_eq!(catalog.find(token).unwrap().name.as_str(), expected);
        assert_eq!(catalog.unit(token).unwrap().name(), expected);
    }

    #[rstest]
    fn test_unit_unknown() {
        let catalog = DimensionCatalog::new(UnitFamily::ElectricCurrent, "Ampere", "Ampere", entries());
        assert_eq!(
            catalog.unit("V").unwrap_err(),
            ModelError::InvalidUnitType("'V' is not a unit of the ELECTRIC_CURRENT family".to_string())
        );
    }

    #[rstest]
    fn test_units_in_declaration_order() {
        let catalog = DimensionCatalog::new(UnitFamily::ElectricCurrent, "Ampere", "Ampere", entries());
        let symbols: Vec<String> = catalog.units().iter().map(|u| u.symbol().to_string()).collect();
        assert_eq!(symbols, vec!["mA", "A", "kA"]);
    }
}
