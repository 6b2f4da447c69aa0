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

//! Composite units formed by multiplying and dividing atomic units.
//!
//! A [`CombinedUnit`] holds an ordered numerator, an ordered denominator and an accumulated
//! scalar `total_factor`. Each side keeps at most one unit per family: inserting a unit whose
//! family is already present converts it into the present unit and folds the conversion into the
//! factor. Adding a unit to one side cancels a same-family unit on the opposite side.
//!
//! A quantity `x` expressed in a composite equals `x * total_factor` expressed in the composite's
//! units with factor 1.

use std::{
    collections::BTreeMap,
    fmt::Display,
    hash::{Hash, Hasher},
    ops::{Div, Mul},
};

use databucket_core::correctness::FAILED;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::{
    error::{ModelError, ModelResult},
    units::{Unit, UnitAny},
};

/// A composite unit (e.g. `kg*m^2/s^2`).
#[derive(Clone, Debug)]
pub struct CombinedUnit {
    numerator: Vec<Unit>,
    denominator: Vec<Unit>,
    total_factor: Decimal,
}

impl CombinedUnit {
    /// Creates a new [`CombinedUnit`] instance with correctness checking.
    ///
    /// Units repeated on one side within a family are converted into the first unit seen for that
    /// family, folding the conversion into `total_factor`. No cancellation happens between sides.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the accumulated factor overflows or underflows to
    /// zero.
    pub fn new_checked(
        numerator: Vec<Unit>,
        denominator: Vec<Unit>,
        total_factor: Decimal,
    ) -> ModelResult<Self> {
        let mut combined = Self::unitless_with_factor(total_factor);
        for unit in numerator {
            let (factor, unit) = fold_into(&combined.numerator, unit)?;
            combined.scale_up(factor)?;
            combined.numerator.push(unit);
        }
        for unit in denominator {
            let (factor, unit) = fold_into(&combined.denominator, unit)?;
            combined.scale_down(factor)?;
            combined.denominator.push(unit);
        }
        Ok(combined)
    }

    /// Creates a new [`CombinedUnit`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the accumulated factor overflows.
    #[must_use]
    pub fn new(numerator: Vec<Unit>, denominator: Vec<Unit>, total_factor: Decimal) -> Self {
        Self::new_checked(numerator, denominator, total_factor).expect(FAILED)
    }

    /// Returns the empty composite with factor 1.
    #[must_use]
    pub fn unitless() -> Self {
        Self::unitless_with_factor(Decimal::ONE)
    }

    fn unitless_with_factor(total_factor: Decimal) -> Self {
        Self {
            numerator: Vec::new(),
            denominator: Vec::new(),
            total_factor,
        }
    }

    /// Lifts `unit` into a singleton composite with factor 1.
    #[must_use]
    pub fn from_unit(unit: Unit) -> Self {
        Self {
            numerator: vec![unit],
            denominator: Vec::new(),
            total_factor: Decimal::ONE,
        }
    }

    #[must_use]
    pub fn numerator(&self) -> &[Unit] {
        &self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> &[Unit] {
        &self.denominator
    }

    #[must_use]
    pub fn total_factor(&self) -> Decimal {
        self.total_factor
    }

    /// Returns whether both sides are empty.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }

    /// Returns an equivalent composite with `total_factor` reset to 1.
    #[must_use]
    pub fn reset_total_factor(&self) -> Self {
        Self {
            total_factor: Decimal::ONE,
            ..self.clone()
        }
    }

    // Factors are positive, so a zero result means the factor underflowed.
    fn scale_up(&mut self, factor: Decimal) -> ModelResult<()> {
        self.total_factor = self
            .total_factor
            .checked_mul(factor)
            .filter(|factor| !factor.is_zero())
            .ok_or_else(|| ModelError::overflow("unit factor"))?;
        Ok(())
    }

    fn scale_down(&mut self, factor: Decimal) -> ModelResult<()> {
        self.total_factor = self
            .total_factor
            .checked_div(factor)
            .filter(|factor| !factor.is_zero())
            .ok_or_else(|| ModelError::overflow("unit factor"))?;
        Ok(())
    }

    fn add_numerator(&mut self, unit: &Unit) -> ModelResult<()> {
        let (factor, unit) = fold_into(&self.numerator, unit.clone())?;
        self.scale_up(factor)?;

        if let Some(index) = position_of_family(&self.denominator, &unit) {
            let cancelled = self.denominator.remove(index);
            self.scale_up(unit.ratio_to(&cancelled)?)?;
        } else {
            self.numerator.push(unit);
        }
        Ok(())
    }

    fn add_denominator(&mut self, unit: &Unit) -> ModelResult<()> {
        let (factor, unit) = fold_into(&self.denominator, unit.clone())?;
        self.scale_down(factor)?;

        if let Some(index) = position_of_family(&self.numerator, &unit) {
            let cancelled = self.numerator.remove(index);
            self.scale_down(unit.ratio_to(&cancelled)?)?;
        } else {
            self.denominator.push(unit);
        }
        Ok(())
    }

    /// Returns the composite `self * other`.
    ///
    /// The factor carried by a composite `other` is folded into the result.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the accumulated factor overflows.
    pub fn try_multiply(&self, other: &UnitAny) -> ModelResult<Self> {
        let mut result = self.clone();
        match other {
            UnitAny::Atomic(unit) => result.add_numerator(unit)?,
            UnitAny::Combined(combined) => {
                for unit in &combined.numerator {
                    result.add_numerator(unit)?;
                }
                for unit in &combined.denominator {
                    result.add_denominator(unit)?;
                }
                result.scale_up(combined.total_factor)?;
            }
        }
        Ok(result)
    }

    /// Returns the composite `self / other`.
    ///
    /// The factor carried by a composite `other` divides the result.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the accumulated factor overflows.
    pub fn try_divide(&self, other: &UnitAny) -> ModelResult<Self> {
        let mut result = self.clone();
        match other {
            UnitAny::Atomic(unit) => result.add_denominator(unit)?,
            UnitAny::Combined(combined) => {
                for unit in &combined.numerator {
                    result.add_denominator(unit)?;
                }
                for unit in &combined.denominator {
                    result.add_numerator(unit)?;
                }
                result.scale_down(combined.total_factor)?;
            }
        }
        Ok(result)
    }

    /// Returns the composite `self * other`.
    ///
    /// # Panics
    ///
    /// Panics if the accumulated factor overflows.
    #[must_use]
    pub fn multiply(&self, other: &UnitAny) -> Self {
        self.try_multiply(other).expect(FAILED)
    }

    /// Returns the composite `self / other`.
    ///
    /// # Panics
    ///
    /// Panics if the accumulated factor overflows.
    #[must_use]
    pub fn divide(&self, other: &UnitAny) -> Self {
        self.try_divide(other).expect(FAILED)
    }

    /// Rewrites every unit sharing a family with a unit of `to_unit` into that unit.
    ///
    /// The conversion factors accumulate into `total_factor` (multiplied for the numerator,
    /// divided for the denominator). Units with no counterpart in `to_unit` pass through.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the accumulated factor overflows.
    pub fn try_convert(&self, to_unit: &UnitAny) -> ModelResult<Self> {
        let mut result = self.clone();
        for target in to_unit.parts() {
            for index in 0..result.numerator.len() {
                let unit = &result.numerator[index];
                if unit.is_same_family(target) && unit != target {
                    let ratio = unit.ratio_to(target)?;
                    result.scale_up(ratio)?;
                    result.numerator[index] = target.clone();
                }
            }
            for index in 0..result.denominator.len() {
                let unit = &result.denominator[index];
                if unit.is_same_family(target) && unit != target {
                    let ratio = unit.ratio_to(target)?;
                    result.scale_down(ratio)?;
                    result.denominator[index] = target.clone();
                }
            }
        }
        Ok(result)
    }

    /// Rewrites every unit sharing a family with a unit of `to_unit` into that unit.
    ///
    /// # Panics
    ///
    /// Panics if the accumulated factor overflows.
    #[must_use]
    pub fn convert(&self, to_unit: &UnitAny) -> Self {
        self.try_convert(to_unit).expect(FAILED)
    }

    /// Returns whether `other` denotes the same units at the same scale.
    ///
    /// Unlike `==`, which compares the canonical form only, this converts `other` into the units
    /// of `self` and compares the resulting factors. A conversion that overflows is not the same
    /// scale.
    #[must_use]
    pub fn same_scale(&self, other: &Self) -> bool {
        other
            .try_convert(&UnitAny::Combined(self.clone()))
            .is_ok_and(|converted| {
                converted.canonical() == self.canonical()
                    && converted.total_factor == self.total_factor
            })
    }

    /// Returns the canonical string form, e.g. `kg*m^2/s^2`, `1/s` or `1`.
    #[must_use]
    pub fn canonical(&self) -> String {
        let numerator = render_side(&self.numerator);
        if self.denominator.is_empty() {
            numerator
        } else {
            format!("{numerator}/{}", render_side(&self.denominator))
        }
    }
}

/// Converts `unit` into the unit already present in `side` for its family, if any.
fn fold_into(side: &[Unit], unit: Unit) -> ModelResult<(Decimal, Unit)> {
    match side.iter().find(|present| present.is_same_family(&unit)) {
        Some(present) => Ok((unit.ratio_to(present)?, present.clone())),
        None => Ok((Decimal::ONE, unit)),
    }
}

fn position_of_family(side: &[Unit], unit: &Unit) -> Option<usize> {
    side.iter().position(|u| u.is_same_family(unit))
}

fn render_side(side: &[Unit]) -> String {
    if side.is_empty() {
        return "1".to_string();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for unit in side {
        *counts.entry(unit.symbol()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(symbol, count)| match count {
            1 => symbol.to_string(),
            n => format!("{symbol}^{n}"),
        })
        .collect::<Vec<_>>()
        .join("*")
}

impl PartialEq for CombinedUnit {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for CombinedUnit {}

impl Hash for CombinedUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Display for CombinedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for CombinedUnit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

// The operators panic on factor overflow, see `try_multiply` and `try_divide`.
impl<T: Into<UnitAny>> Mul<T> for CombinedUnit {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        self.multiply(&rhs.into())
    }
}

impl<T: Into<UnitAny>> Mul<T> for &CombinedUnit {
    type Output = CombinedUnit;

    fn mul(self, rhs: T) -> Self::Output {
        self.multiply(&rhs.into())
    }
}

impl<T: Into<UnitAny>> Div<T> for CombinedUnit {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        self.divide(&rhs.into())
    }
}

impl<T: Into<UnitAny>> Div<T> for &CombinedUnit {
    type Output = CombinedUnit;

    fn div(self, rhs: T) -> Self::Output {
        self.divide(&rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::units::{currency, length, time, weight};

    #[rstest]
    fn test_walk_through() {
        let length = length();
        let weight = weight();

        let combined = CombinedUnit::new(vec![weight.gram.clone()], vec![length.meter.clone()], dec!(1));
        assert_eq!(combined.to_string(), "g/m");
        assert_eq!(combined.total_factor(), dec!(1));

        let combined = combined.convert(&UnitAny::from(&weight.kilogram));
        assert_eq!(combined.total_factor(), dec!(0.001));
        assert_eq!(combined.numerator(), &[weight.kilogram.clone()]);

        let combined = combined.divide(&UnitAny::from(&length.meter));
        assert_eq!(
            combined.denominator(),
            &[length.meter.clone(), length.meter.clone()]
        );
        assert_eq!(combined.to_string(), "kg/m^2");

        let square_meter = &length.meter * &length.meter;
        let combined = combined.multiply(&UnitAny::from(square_meter));
        assert!(combined.denominator().is_empty());
        assert_eq!(combined.to_string(), "kg");
        assert_eq!(combined.total_factor(), dec!(0.001));
    }

    #[rstest]
    fn test_new_folds_same_family_per_side() {
        let length = length();
        let combined = CombinedUnit::new(
            vec![length.meter.clone(), length.millimeter.clone()],
            vec![time().second.clone(), time().millisecond.clone()],
            dec!(2),
        );
        assert_eq!(combined.to_string(), "m^2/s^2");
        // 2 * 0.001 (mm -> m) / 0.001 (ms -> s)
        assert_eq!(combined.total_factor(), dec!(2));
    }

    #[rstest]
    fn test_cancellation_applies_conversion() {
        let length = length();
        // (1/m) * km == 1000
        let per_meter = CombinedUnit::unitless().divide(&UnitAny::from(&length.meter));
        assert_eq!(per_meter.to_string(), "1/m");

        let combined = per_meter.multiply(&UnitAny::from(&length.kilometer));
        assert!(combined.is_none());
        assert_eq!(combined.total_factor(), dec!(1000));

        // km / m == 1000
        let combined =
            CombinedUnit::from_unit(length.kilometer.clone()).divide(&UnitAny::from(&length.meter));
        assert!(combined.is_none());
        assert_eq!(combined.total_factor(), dec!(1000));
    }

    #[rstest]
    fn test_divide_by_composite() {
        let length = length();
        let time = time();
        let speed = &length.kilometer / &time.hour;
        let combined = CombinedUnit::from_unit(length.meter.clone()).divide(&UnitAny::from(&speed));
        assert_eq!(combined.to_string(), "h");
        assert_eq!(combined.total_factor(), dec!(0.001));
    }

    #[rstest]
    fn test_composite_operand_factor_is_folded() {
        let meter = CombinedUnit::from_unit(length().meter.clone());
        let scaled_seconds = UnitAny::from(CombinedUnit::new(vec![time().second.clone()], vec![], dec!(1000)));

        let product = meter.multiply(&scaled_seconds);
        assert_eq!(product.to_string(), "m*s");
        assert_eq!(product.total_factor(), dec!(1000));

        let quotient = meter.divide(&scaled_seconds);
        assert_eq!(quotient.to_string(), "m/s");
        assert_eq!(quotient.total_factor(), dec!(0.001));
    }

    #[rstest]
    fn test_canonical_forms() {
        let length = length();
        let time = time();
        let weight = weight();

        assert_eq!(CombinedUnit::unitless().to_string(), "1");

        let energy = CombinedUnit::new(
            vec![weight.kilogram.clone(), length.meter.clone(), length.meter.clone()],
            vec![time.second.clone(), time.second.clone()],
            dec!(1),
        );
        assert_eq!(energy.to_string(), "kg*m^2/s^2");

        let frequency = CombinedUnit::unitless().divide(&UnitAny::from(&time.second));
        assert_eq!(frequency.to_string(), "1/s");
    }

    #[rstest]
    fn test_equality_is_structural() {
        let length = length();
        let weight = weight();
        let left = CombinedUnit::new(vec![weight.kilogram.clone(), length.meter.clone()], vec![], dec!(1));
        let right = CombinedUnit::new(vec![length.meter.clone(), weight.kilogram.clone()], vec![], dec!(5));
        assert_eq!(left, right);
        assert!(!left.same_scale(&right));

        let set: HashSet<CombinedUnit> = [left.clone(), right].into_iter().collect();
        assert_eq!(set.len(), 1);

        let grams = CombinedUnit::new(vec![weight.gram.clone(), length.meter.clone()], vec![], dec!(1));
        assert_ne!(left, grams);
        assert!(!left.same_scale(&grams));

        let scaled = CombinedUnit::new(vec![weight.gram.clone(), length.meter.clone()], vec![], dec!(1000));
        assert!(left.same_scale(&scaled));
    }

    #[rstest]
    fn test_convert_passes_unmatched_through() {
        let length = length();
        let price = &currency().euro / &length.kilometer;
        let converted = price.convert(&UnitAny::from(&length.meter));
        assert_eq!(converted.to_string(), "EUR/m");
        assert_eq!(converted.total_factor(), dec!(0.001));

        let converted = price.convert(&UnitAny::from(&time().second));
        assert_eq!(converted, price);
        assert_eq!(converted.total_factor(), dec!(1));
    }

    #[rstest]
    fn test_reset_total_factor() {
        let combined = CombinedUnit::new(vec![length().millimeter.clone()], vec![], dec!(7));
        let reset = combined.reset_total_factor();
        assert_eq!(reset.total_factor(), dec!(1));
        assert_eq!(reset, combined);
    }

    #[rstest]
    fn test_factor_overflow_is_an_error() {
        let length = length();
        let cube = |unit: &Unit| CombinedUnit::new(vec![unit.clone(); 3], vec![], dec!(1));
        let cubic_nm = cube(&length.nanometer);
        let cubic_km = cube(&length.kilometer);

        // Each km folded into nm contributes 1e12
        let err = cubic_nm.try_multiply(&UnitAny::from(&cubic_km)).unwrap_err();
        assert!(matches!(err, ModelError::InvalidValue(_)));
        assert!(cubic_nm.try_divide(&UnitAny::from(&cubic_km)).is_err());
        assert!(cubic_km.try_convert(&UnitAny::from(&cubic_nm)).is_err());
        assert!(!cubic_nm.same_scale(&cubic_km));

        let mut numerator = vec![length.nanometer.clone()];
        numerator.extend(vec![length.kilometer.clone(); 2]);
        let folded = CombinedUnit::new_checked(numerator.clone(), vec![], dec!(1)).unwrap();
        assert_eq!(folded.to_string(), "nm^3");
        assert_eq!(folded.total_factor(), dec!(1_000_000_000_000_000_000_000_000));

        numerator.push(length.kilometer.clone());
        assert!(CombinedUnit::new_checked(numerator, vec![], dec!(1)).is_err());
    }

    #[rstest]
    fn test_serialize() {
        let speed = &length().meter / &time().second;
        assert_eq!(serde_json::to_string(&speed).unwrap(), "\"m/s\"");
    }
}
