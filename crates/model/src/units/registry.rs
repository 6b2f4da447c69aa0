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

//! Family-keyed lookup of dimension catalogs, units and unit expressions.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{
    enums::UnitFamily,
    error::{ModelError, ModelResult},
    units::{
        CombinedUnit, CurrencyRateProvider, CurrencyUnits, DimensionCatalog, Unit, UnitAny,
        currency, electric_current, length, time, weight,
    },
};

static GLOBAL_REGISTRY: OnceLock<UnitRegistry> = OnceLock::new();

/// A registry of dimension catalogs keyed by [`UnitFamily`].
#[derive(Clone, Debug, Default)]
pub struct UnitRegistry {
    catalogs: IndexMap<UnitFamily, Arc<DimensionCatalog>>,
}

impl UnitRegistry {
    /// Creates a new empty [`UnitRegistry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the process-wide catalog of every family.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for catalog in [
            &length().catalog,
            &weight().catalog,
            &time().catalog,
            &electric_current().catalog,
            &currency().catalog,
        ] {
            registry.insert(Arc::clone(catalog));
        }
        registry
    }

    /// Creates a registry whose currency catalog is built from `provider` rates at `at`.
    #[must_use]
    pub fn with_currency_provider(provider: &dyn CurrencyRateProvider, at: DateTime<Utc>) -> Self {
        let mut registry = Self::with_defaults();
        let units = CurrencyUnits::initialize_with(Some(provider), at);
        registry.insert(units.catalog);
        registry
    }

    /// Returns the process-wide registry of default catalogs.
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::with_defaults)
    }

    /// Registers `catalog` under its family.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog is already registered for the family.
    pub fn register(&mut self, catalog: Arc<DimensionCatalog>) -> anyhow::Result<()> {
        let family = catalog.family();
        if self.catalogs.contains_key(&family) {
            anyhow::bail!("catalog for {family} already registered");
        }
        self.insert(catalog);
        Ok(())
    }

    fn insert(&mut self, catalog: Arc<DimensionCatalog>) {
        let family = catalog.family();
        log::debug!("Registered {family} catalog ({} units)", catalog.len());
        self.catalogs.insert(family, catalog);
    }

    /// Returns the registered families in registration order.
    pub fn families(&self) -> impl Iterator<Item = UnitFamily> + '_ {
        self.catalogs.keys().copied()
    }

    #[must_use]
    pub fn catalog(&self, family: UnitFamily) -> Option<&Arc<DimensionCatalog>> {
        self.catalogs.get(&family)
    }

    /// Returns the catalog for a family given by name (e.g. `"length"`, `"LengthUnit"`).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidUnitType`] if no registered family matches `name`.
    pub fn catalog_by_name(&self, name: &str) -> ModelResult<&Arc<DimensionCatalog>> {
        UnitFamily::from_loose_name(name)
            .and_then(|family| self.catalog(family))
            .ok_or_else(|| ModelError::InvalidUnitType(format!("unknown unit family '{name}'")))
    }

    /// Resolves `name_or_symbol` within `family`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidUnitType`] if the family is not registered or has no such
    /// unit.
    pub fn resolve(&self, family: UnitFamily, name_or_symbol: &str) -> ModelResult<Unit> {
        self.catalog(family)
            .ok_or_else(|| {
                ModelError::InvalidUnitType(format!("unit family {family} is not registered"))
            })?
            .unit(name_or_symbol)
    }

    /// Finds `token` in every registered family, in registration order.
    ///
    /// Exact symbols are preferred over case-insensitive names across all families.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidUnitType`] if no family has such a unit.
    pub fn find_unit(&self, token: &str) -> ModelResult<Unit> {
        let token = token.trim();
        self.catalogs
            .values()
            .find_map(|catalog| {
                catalog
                    .entries()
                    .find(|e| e.symbol.as_str() == token)
                    .map(|e| Unit::from_entry(catalog, e))
            })
            .or_else(|| {
                self.catalogs
                    .values()
                    .find_map(|catalog| catalog.unit(token).ok())
            })
            .ok_or_else(|| ModelError::InvalidUnitType(format!("unknown unit '{token}'")))
    }

    /// Parses a unit expression in canonical form, e.g. `kg*m^2/s^2`, `1/s` or `km`.
    ///
    /// Returns `None` for the unitless expression `1`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidUnitType`] if the expression is malformed or names an
    /// unknown unit, or [`ModelError::InvalidValue`] if folding its units overflows.
    pub fn parse(&self, expr: &str) -> ModelResult<Option<UnitAny>> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(ModelError::InvalidUnitType("empty unit expression".to_string()));
        }

        let (numerator, denominator) = match expr.split_once('/') {
            Some((numerator, denominator)) => (numerator, Some(denominator)),
            None => (expr, None),
        };

        let numerator = self.parse_side(numerator, expr)?;
        let denominator = match denominator {
            Some(side) => {
                let units = self.parse_side(side, expr)?;
                if units.is_empty() {
                    return Err(invalid_expression(expr));
                }
                units
            }
            None => Vec::new(),
        };

        let combined = CombinedUnit::new_checked(numerator, denominator, Decimal::ONE)?;
        if combined.total_factor() != Decimal::ONE {
            return Ok(Some(UnitAny::Combined(combined)));
        }
        Ok(UnitAny::simplify(combined))
    }

    fn parse_side(&self, side: &str, expr: &str) -> ModelResult<Vec<Unit>> {
        let side = side.trim();
        if side == "1" {
            return Ok(Vec::new());
        }

        let mut units = Vec::new();
        for term in side.split('*') {
            let (symbol, power) = match term.split_once('^') {
                Some((symbol, power)) => {
                    let power: usize = power
                        .trim()
                        .parse()
                        .map_err(|_| invalid_expression(expr))?;
                    if power == 0 {
                        return Err(invalid_expression(expr));
                    }
                    (symbol, power)
                }
                None => (term, 1),
            };

            let symbol = symbol.trim();
            if symbol.is_empty() {
                return Err(invalid_expression(expr));
            }
            let unit = self.find_unit(symbol)?;
            units.extend(std::iter::repeat_n(unit, power));
        }
        Ok(units)
    }
}

fn invalid_expression(expr: &str) -> ModelError {
    ModelError::InvalidUnitType(format!("malformed unit expression '{expr}'"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    fn test_with_defaults() {
        let registry = UnitRegistry::with_defaults();
        let families: Vec<UnitFamily> = registry.families().collect();
        assert_eq!(
            families,
            vec![
                UnitFamily::Length,
                UnitFamily::Weight,
                UnitFamily::Time,
                UnitFamily::ElectricCurrent,
                UnitFamily::Currency,
            ]
        );
        assert!(Arc::ptr_eq(
            registry.catalog(UnitFamily::Length).unwrap(),
            &length().catalog
        ));
    }

    #[rstest]
    fn test_register_duplicate_family() {
        let mut registry = UnitRegistry::new();
        registry.register(Arc::clone(&time().catalog)).unwrap();
        let err = registry.register(Arc::clone(&time().catalog)).unwrap_err();
        assert_eq!(err.to_string(), "catalog for TIME already registered");
    }

    #[rstest]
    fn test_with_currency_provider() {
        let provider = |_code: &str, _at: DateTime<Utc>| -> anyhow::Result<Decimal> { Ok(dec!(2)) };
        let registry = UnitRegistry::with_currency_provider(&provider, Utc::now());
        let euro = registry.resolve(UnitFamily::Currency, "EUR").unwrap();
        assert_eq!(euro.factor(), dec!(2));
        assert_eq!(currency().euro.factor(), dec!(1.21));
    }

    #[rstest]
    #[case("length", UnitFamily::Length)]
    #[case("ElectricCurrentUnit", UnitFamily::ElectricCurrent)]
    fn test_catalog_by_name(#[case] name: &str, #[case] expected: UnitFamily) {
        let registry = UnitRegistry::global();
        assert_eq!(registry.catalog_by_name(name).unwrap().family(), expected);
    }

    #[rstest]
    fn test_catalog_by_name_unknown() {
        assert!(matches!(
            UnitRegistry::global().catalog_by_name("volume"),
            Err(ModelError::InvalidUnitType(_))
        ));
    }

    #[rstest]
    fn test_resolve() {
        let registry = UnitRegistry::global();
        assert_eq!(
            registry.resolve(UnitFamily::Weight, "lb").unwrap(),
            weight().pound
        );
        assert!(registry.resolve(UnitFamily::Weight, "m").is_err());
        assert!(
            UnitRegistry::new()
                .resolve(UnitFamily::Weight, "kg")
                .is_err()
        );
    }

    #[rstest]
    #[case("m", UnitFamily::Length)]
    #[case("min", UnitFamily::Time)]
    #[case("mA", UnitFamily::ElectricCurrent)]
    #[case("MA", UnitFamily::ElectricCurrent)]
    #[case("kilogram", UnitFamily::Weight)]
    #[case("CHF", UnitFamily::Currency)]
    fn test_find_unit(#[case] token: &str, #[case] family: UnitFamily) {
        assert_eq!(UnitRegistry::global().find_unit(token).unwrap().family(), family);
    }

    #[rstest]
    #[case("kg*m^2/s^2")]
    #[case("1/s")]
    #[case("EUR/km")]
    #[case("A*s")]
    fn test_parse_canonical_round_trip(#[case] expr: &str) {
        let unit = UnitRegistry::global().parse(expr).unwrap().unwrap();
        assert_eq!(unit.to_string(), expr);
    }

    #[rstest]
    fn test_parse_atomic_and_unitless() {
        let registry = UnitRegistry::global();
        assert_eq!(
            registry.parse("km").unwrap(),
            Some(UnitAny::Atomic(length().kilometer.clone()))
        );
        assert_eq!(registry.parse("1").unwrap(), None);
    }

    #[rstest]
    fn test_parse_folds_with_factor() {
        let unit = UnitRegistry::global().parse("m*mm").unwrap().unwrap();
        assert_eq!(unit.to_string(), "m^2");
        assert_eq!(unit.total_factor(), dec!(0.001));
    }

    #[rstest]
    #[case("")]
    #[case("parsec")]
    #[case("m/")]
    #[case("m^0")]
    #[case("m^x")]
    #[case("kg**m")]
    fn test_parse_invalid(#[case] expr: &str) {
        assert!(matches!(
            UnitRegistry::global().parse(expr),
            Err(ModelError::InvalidUnitType(_))
        ));
    }
}
