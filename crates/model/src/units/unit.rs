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

//! Represents an atomic unit of measure within one dimension family.

use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    ops::{Div, Mul},
    sync::Arc,
};

use databucket_core::correctness::FAILED;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use ustr::Ustr;

use crate::{
    enums::UnitFamily,
    error::{ModelError, ModelResult},
    units::{CatalogEntry, CombinedUnit, DimensionCatalog, UnitAny},
};

/// An atomic unit of measure (e.g. meter, gram, second).
///
/// Units are created from their family's [`DimensionCatalog`] and share it by [`Arc`]. Two units
/// are equal iff they belong to the same family and carry the same name; units of different
/// families are simply unequal.
#[derive(Clone)]
pub struct Unit {
    name: Ustr,
    symbol: Ustr,
    factor: Decimal,
    catalog: Arc<DimensionCatalog>,
}

impl Unit {
    pub(crate) fn from_entry(catalog: &Arc<DimensionCatalog>, entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name,
            symbol: entry.symbol,
            factor: entry.factor,
            catalog: Arc::clone(catalog),
        }
    }

    /// Creates a new [`Unit`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidUnitType`] if `name_or_symbol` is not in `catalog`.
    pub fn new_checked(catalog: &Arc<DimensionCatalog>, name_or_symbol: &str) -> ModelResult<Self> {
        catalog.unit(name_or_symbol)
    }

    /// Creates a new [`Unit`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `name_or_symbol` is not in `catalog`.
    #[must_use]
    pub fn new(catalog: &Arc<DimensionCatalog>, name_or_symbol: &str) -> Self {
        Self::new_checked(catalog, name_or_symbol).expect(FAILED)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// Returns the factor of this unit relative to its family base unit.
    #[must_use]
    pub fn factor(&self) -> Decimal {
        self.factor
    }

    #[must_use]
    pub fn family(&self) -> UnitFamily {
        self.catalog.family()
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<DimensionCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn is_same_family(&self, other: &Self) -> bool {
        self.family() == other.family()
    }

    /// Returns the factor which re-expresses a quantity in `self` as a quantity in `other`.
    ///
    /// Callers must ensure both units share a family.
    pub(crate) fn ratio_to(&self, other: &Self) -> ModelResult<Decimal> {
        debug_assert!(self.is_same_family(other));
        self.factor
            .checked_div(other.factor)
            .filter(|ratio| !ratio.is_zero())
            .ok_or_else(|| ModelError::overflow("unit conversion"))
    }

    /// Converts this unit into `to_unit`, returning the conversion factor and the target unit.
    ///
    /// A quantity `x` expressed in `self` equals `x * factor` expressed in `to_unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] if the units belong to different families.
    pub fn convert(&self, to_unit: &Self) -> ModelResult<(Decimal, Self)> {
        if !self.is_same_family(to_unit) {
            return Err(ModelError::DimensionMismatch {
                from: self.symbol.to_string(),
                from_family: self.family(),
                to: to_unit.symbol.to_string(),
                to_family: to_unit.family(),
            });
        }
        Ok((self.ratio_to(to_unit)?, to_unit.clone()))
    }

    /// Returns the composite unit `self * other`.
    ///
    /// # Panics
    ///
    /// Panics if the composite factor overflows, see [`CombinedUnit::try_multiply`].
    #[must_use]
    pub fn multiply(&self, other: &UnitAny) -> CombinedUnit {
        CombinedUnit::from_unit(self.clone()).multiply(other)
    }

    /// Returns the composite unit `self / other`.
    ///
    /// # Panics
    ///
    /// Panics if the composite factor overflows, see [`CombinedUnit::try_divide`].
    #[must_use]
    pub fn divide(&self, other: &UnitAny) -> CombinedUnit {
        CombinedUnit::from_unit(self.clone()).divide(other)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.family() == other.family() && self.name == other.name
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family().hash(state);
        self.name.hash(state);
    }
}

impl Debug for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Unit))
            .field("family", &self.family())
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("factor", &self.factor)
            .finish()
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl Serialize for Unit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.symbol.as_str())
    }
}

impl<T: Into<UnitAny>> Mul<T> for Unit {
    type Output = CombinedUnit;

    fn mul(self, rhs: T) -> Self::Output {
        self.multiply(&rhs.into())
    }
}

impl<T: Into<UnitAny>> Mul<T> for &Unit {
    type Output = CombinedUnit;

    fn mul(self, rhs: T) -> Self::Output {
        self.multiply(&rhs.into())
    }
}

impl<T: Into<UnitAny>> Div<T> for Unit {
    type Output = CombinedUnit;

    fn div(self, rhs: T) -> Self::Output {
        self.divide(&rhs.into())
    }
}

impl<T: Into<UnitAny>> Div<T> for &Unit {
    type Output = CombinedUnit;

    fn div(self, rhs: T) -> Self::Output {
        self.divide(&rhs.into())
    }
}
