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

//! Represents a fixed-precision decimal quantity with an optional unit.
//!
//! Arithmetic reconciles units: addition, subtraction and remainder re-express the right operand
//! in the left operand's unit, while multiplication and division combine units algebraically
//! and fold the resulting conversion factor into the raw quantity. Comparisons (`==`, `<`, ...)
//! look at raw quantized values only; [`NumberValue::compare_quantity`] is the unit-aware form.

use std::{
    cmp::Ordering,
    fmt::Display,
    sync::{Arc, Weak},
};

use chrono::TimeDelta;
use databucket_core::correctness::FAILED;
use rust_decimal::{Decimal, MathematicalOps, prelude::ToPrimitive};
use rust_decimal_macros::dec;

use crate::{
    enums::{BinaryOp, CompareOp, UnaryOp, UnitFamily, ValueKind},
    error::{ModelError, ModelResult},
    field::FieldInfo,
    types::fixed::{
        DEFAULT_DECIMAL_PLACES, check_fixed_precision, f64_to_decimal, max_precision,
        parse_decimal, quantize,
    },
    units::{CombinedUnit, Unit, UnitAny, UnitRegistry},
    values::{Operand, Value},
};

const NANOS_PER_SECOND: Decimal = dec!(1000000000);

/// A decimal quantity quantized to `decimal_places`, with an optional unit.
#[derive(Clone, Debug)]
pub struct NumberValue {
    raw: Decimal,
    decimal_places: u8,
    unit: Option<UnitAny>,
    field: Option<Weak<FieldInfo>>,
}

impl NumberValue {
    /// Creates a new [`NumberValue`] instance with correctness checking.
    ///
    /// A composite unit carrying a `total_factor` other than 1 has the factor folded into the
    /// quantity, so the stored unit always has factor 1.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `decimal_places` exceeds [`FIXED_PRECISION`](crate::types::FIXED_PRECISION).
    /// - `value` cannot be interpreted as a decimal number.
    pub fn new_checked(
        value: impl Into<Operand>,
        decimal_places: u8,
        unit: Option<UnitAny>,
    ) -> ModelResult<Self> {
        check_fixed_precision(decimal_places)?;
        let mut raw = decimal_from_operand(&value.into())?;

        let unit = match unit {
            Some(UnitAny::Combined(combined)) => {
                raw = raw
                    .checked_mul(combined.total_factor())
                    .ok_or_else(|| ModelError::overflow("unit factor"))?;
                UnitAny::simplify(combined)
            }
            other => other,
        };

        Ok(Self {
            raw: quantize(raw, decimal_places)?,
            decimal_places,
            unit,
            field: None,
        })
    }

    /// Creates a new [`NumberValue`] instance.
    ///
    /// # Panics
    ///
    /// Panics if any of the [`NumberValue::new_checked`] checks fail.
    #[must_use]
    pub fn new(value: impl Into<Operand>, decimal_places: u8, unit: Option<UnitAny>) -> Self {
        Self::new_checked(value, decimal_places, unit).expect(FAILED)
    }

    /// Creates a new [`NumberValue`] with the unit given as an expression (e.g. `"km/h"`).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidUnitType`] if `unit_expr` does not name a unit, or any error
    /// of [`NumberValue::new_checked`].
    pub fn with_unit_expr(
        value: impl Into<Operand>,
        decimal_places: u8,
        unit_expr: &str,
    ) -> ModelResult<Self> {
        let unit = UnitRegistry::global().parse(unit_expr)?;
        Self::new_checked(value, decimal_places, unit)
    }

    /// Creates a new unitless [`NumberValue`] at the default precision.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `value` is not a decimal number.
    pub fn from_operand(value: impl Into<Operand>) -> ModelResult<Self> {
        Self::new_checked(value, DEFAULT_DECIMAL_PLACES, None)
    }

    /// Creates a new [`NumberValue`] expressing `delta` in the time unit `unit`.
    ///
    /// # Errors
    ///
    /// Returns an error if `unit` is not a time unit or `decimal_places` is invalid.
    pub fn from_duration(delta: TimeDelta, unit: &Unit, decimal_places: u8) -> ModelResult<Self> {
        check_time_unit(unit)?;
        let seconds = Decimal::from(delta.num_seconds())
            + Decimal::new(i64::from(delta.subsec_nanos()), 9);
        let raw = seconds
            .checked_div(unit.factor())
            .ok_or_else(|| ModelError::overflow("duration"))?;
        Self::new_checked(raw, decimal_places, Some(UnitAny::from(unit)))
    }

    /// Links this value to the field that produced it.
    #[must_use]
    pub fn with_field(mut self, field: &Arc<FieldInfo>) -> Self {
        self.field = Some(Arc::downgrade(field));
        self
    }

    #[must_use]
    pub fn raw(&self) -> Decimal {
        self.raw
    }

    #[must_use]
    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    #[must_use]
    pub fn unit(&self) -> Option<&UnitAny> {
        self.unit.as_ref()
    }

    /// Returns the field that produced this value, if it is still alive.
    #[must_use]
    pub fn connected_field(&self) -> Option<Arc<FieldInfo>> {
        self.field.as_ref().and_then(Weak::upgrade)
    }

    /// Coerces `value` into a [`NumberValue`] at this value's precision.
    ///
    /// A [`NumberValue`] operand is returned as is; any other value supplies its raw primitive.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `value` is not a decimal number.
    pub fn cast(&self, value: impl Into<Operand>) -> ModelResult<Self> {
        match value.into() {
            Operand::Value(Value::Number(number)) => Ok(number),
            other => Self::new_checked(other, self.decimal_places, None),
        }
    }

    fn derive(&self, raw: Decimal, decimal_places: u8, unit: Option<UnitAny>) -> ModelResult<Self> {
        Ok(Self {
            raw: quantize(raw, decimal_places)?,
            decimal_places,
            unit,
            field: None,
        })
    }

    /// Re-expresses `rhs` in the unit of `self` (or adopts the unit of `rhs` if `self` has none).
    ///
    /// Returns the unit of the result and the raw quantity of `rhs` expressed in it.
    fn reconcile(&self, rhs: &Self) -> ModelResult<(Option<UnitAny>, Decimal)> {
        match (&self.unit, &rhs.unit) {
            (_, None) => Ok((self.unit.clone(), rhs.raw)),
            (None, Some(right)) => Ok((Some(right.clone()), rhs.raw)),
            (Some(left), Some(right)) => {
                let converted = right.to_combined().try_convert(left)?;
                if converted != left.to_combined() {
                    return Err(ModelError::incompatible(left, right));
                }
                let raw = rhs
                    .raw
                    .checked_mul(converted.total_factor())
                    .ok_or_else(|| ModelError::overflow("unit conversion"))?;
                Ok((Some(left.clone()), raw))
            }
        }
    }

    /// Combines the units of `self` and `rhs` for a product or quotient.
    ///
    /// Returns the resulting unit and the factor to apply to the raw result.
    fn combine_units(&self, rhs: &Self, divide: bool) -> ModelResult<(Option<UnitAny>, Decimal)> {
        let combined = match (&self.unit, &rhs.unit) {
            (None, None) => return Ok((None, Decimal::ONE)),
            (Some(left), None) => return Ok((Some(left.clone()), Decimal::ONE)),
            (None, Some(right)) if !divide => return Ok((Some(right.clone()), Decimal::ONE)),
            (left, Some(right)) => {
                let base = left
                    .as_ref()
                    .map_or_else(CombinedUnit::unitless, UnitAny::to_combined);
                if divide {
                    base.try_divide(right)?
                } else {
                    base.try_multiply(right)?
                }
            }
        };
        let factor = combined.total_factor();
        Ok((UnitAny::simplify(combined), factor))
    }

    /// Returns `self + rhs` in the unit of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IncompatibleUnits`] if the units cannot be reconciled, or
    /// [`ModelError::InvalidValue`] if `rhs` is not a number or the sum overflows.
    pub fn add(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let rhs = self.cast(rhs)?;
        let (unit, rhs_raw) = self.reconcile(&rhs)?;
        let raw = self
            .raw
            .checked_add(rhs_raw)
            .ok_or_else(|| ModelError::overflow(BinaryOp::Add))?;
        self.derive(raw, max_precision(self.decimal_places, rhs.decimal_places), unit)
    }

    /// Returns `self - rhs` in the unit of `self`.
    ///
    /// # Errors
    ///
    /// As for [`NumberValue::add`].
    pub fn sub(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let rhs = self.cast(rhs)?;
        let (unit, rhs_raw) = self.reconcile(&rhs)?;
        let raw = self
            .raw
            .checked_sub(rhs_raw)
            .ok_or_else(|| ModelError::overflow(BinaryOp::Sub))?;
        self.derive(raw, max_precision(self.decimal_places, rhs.decimal_places), unit)
    }

    /// Returns `self * rhs`, combining units algebraically.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `rhs` is not a number or the product overflows.
    pub fn mul(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let rhs = self.cast(rhs)?;
        let (unit, factor) = self.combine_units(&rhs, false)?;
        let raw = self
            .raw
            .checked_mul(rhs.raw)
            .and_then(|raw| raw.checked_mul(factor))
            .ok_or_else(|| ModelError::overflow(BinaryOp::Mul))?;
        self.derive(raw, max_precision(self.decimal_places, rhs.decimal_places), unit)
    }

    fn quotient(&self, rhs: &Self, op: BinaryOp) -> ModelResult<(Decimal, Option<UnitAny>)> {
        if rhs.raw.is_zero() {
            return Err(ModelError::DivisionByZero);
        }
        let (unit, factor) = self.combine_units(rhs, true)?;
        let raw = self
            .raw
            .checked_div(rhs.raw)
            .and_then(|raw| raw.checked_mul(factor))
            .ok_or_else(|| ModelError::overflow(op))?;
        Ok((raw, unit))
    }

    /// Returns `self / rhs`, combining units algebraically.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DivisionByZero`] if `rhs` is zero, or [`ModelError::InvalidValue`]
    /// if `rhs` is not a number or the quotient overflows.
    pub fn div(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let rhs = self.cast(rhs)?;
        let (raw, unit) = self.quotient(&rhs, BinaryOp::Div)?;
        self.derive(raw, max_precision(self.decimal_places, rhs.decimal_places), unit)
    }

    /// Returns the integral part of `self / rhs` (rounded toward zero), combining units.
    ///
    /// The unit conversion factor is applied before the integral part is taken.
    ///
    /// # Errors
    ///
    /// As for [`NumberValue::div`].
    pub fn floor_div(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let rhs = self.cast(rhs)?;
        let (raw, unit) = self.quotient(&rhs, BinaryOp::FloorDiv)?;
        self.derive(
            raw.trunc(),
            max_precision(self.decimal_places, rhs.decimal_places),
            unit,
        )
    }

    /// Returns the remainder of `self / rhs`, in the unit of `self`.
    ///
    /// The divisor is reconciled into the unit of `self` first. The sign of the result follows
    /// the dividend.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DivisionByZero`] if `rhs` is zero, or
    /// [`ModelError::IncompatibleUnits`] if the units cannot be reconciled.
    pub fn rem(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let rhs = self.cast(rhs)?;
        let (unit, rhs_raw) = self.reconcile(&rhs)?;
        if rhs_raw.is_zero() {
            return Err(ModelError::DivisionByZero);
        }
        let raw = self
            .raw
            .checked_rem(rhs_raw)
            .ok_or_else(|| ModelError::overflow(BinaryOp::Mod))?;
        self.derive(raw, max_precision(self.decimal_places, rhs.decimal_places), unit)
    }

    /// Returns `self` raised to `exponent`, keeping the unit of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidExponent`] if `exponent` carries a unit, or
    /// [`ModelError::InvalidValue`] if the power is undefined or overflows.
    pub fn pow(&self, exponent: impl Into<Operand>) -> ModelResult<Self> {
        let exponent = self.cast(exponent)?;
        if let Some(unit) = &exponent.unit {
            return Err(ModelError::InvalidExponent(unit.to_string()));
        }

        let base = self.raw.normalize();
        let exp = exponent.raw.normalize();
        let raw = if exp.fract().is_zero() {
            exp.to_i64().and_then(|exp| base.checked_powi(exp))
        } else {
            base.checked_powd(exp)
        }
        .ok_or_else(|| ModelError::overflow(BinaryOp::Pow))?;

        self.derive(
            raw,
            max_precision(self.decimal_places, exponent.decimal_places),
            self.unit.clone(),
        )
    }

    /// Compares raw quantized values, ignoring units.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `rhs` is not a number.
    pub fn compare(&self, op: CompareOp, rhs: impl Into<Operand>) -> ModelResult<bool> {
        let rhs = self.cast(rhs)?;
        Ok(op.matches(self.raw.cmp(&rhs.raw)))
    }

    /// Compares quantities, re-expressing `rhs` in the unit of `self` first.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IncompatibleUnits`] if the units cannot be reconciled.
    pub fn compare_quantity(&self, rhs: impl Into<Operand>) -> ModelResult<Ordering> {
        let rhs = self.cast(rhs)?;
        let (_, rhs_raw) = self.reconcile(&rhs)?;
        Ok(self.raw.cmp(&rhs_raw))
    }

    /// Applies a unary operator.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] for [`UnaryOp::Not`] or for inverting a
    /// non-integral value.
    pub fn apply_unary(&self, op: UnaryOp) -> ModelResult<Self> {
        match op {
            UnaryOp::Neg => Ok(self.neg()),
            UnaryOp::Pos => self.derive(self.raw, self.decimal_places, self.unit.clone()),
            UnaryOp::Abs => Ok(self.abs()),
            UnaryOp::Invert => self.invert(),
            UnaryOp::Floor => self.floor(),
            UnaryOp::Ceil => self.ceil(),
            UnaryOp::Not => Err(ModelError::unsupported(op, ValueKind::Number, "")),
        }
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            raw: -self.raw,
            field: None,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            raw: self.raw.abs(),
            field: None,
            ..self.clone()
        }
    }

    /// Returns the bitwise complement `-x - 1` of an integral value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] if the value is not integral.
    pub fn invert(&self) -> ModelResult<Self> {
        if !self.raw.fract().is_zero() {
            return Err(ModelError::unsupported(
                UnaryOp::Invert,
                ValueKind::Number,
                format!("non-integral {}", self.raw),
            ));
        }
        let raw = (-self.raw)
            .checked_sub(Decimal::ONE)
            .ok_or_else(|| ModelError::overflow(UnaryOp::Invert))?;
        self.derive(raw, self.decimal_places, self.unit.clone())
    }

    /// Returns this value re-quantized to `decimal_places`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidPrecision`] if `decimal_places` is out of range.
    pub fn round(&self, decimal_places: u8) -> ModelResult<Self> {
        self.derive(self.raw, decimal_places, self.unit.clone())
    }

    /// Returns the largest integer not greater than this value, at precision 0.
    ///
    /// # Errors
    ///
    /// Never fails for a valid value; shares the signature of the other unary operations.
    pub fn floor(&self) -> ModelResult<Self> {
        self.derive(self.raw.floor(), 0, self.unit.clone())
    }

    /// Returns the smallest integer not less than this value, at precision 0.
    ///
    /// # Errors
    ///
    /// Never fails for a valid value; shares the signature of the other unary operations.
    pub fn ceil(&self) -> ModelResult<Self> {
        self.derive(self.raw.ceil(), 0, self.unit.clone())
    }

    /// Returns the integral part of the quantized value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the value does not fit in an `i64`.
    pub fn to_i64(&self) -> ModelResult<i64> {
        self.raw
            .trunc()
            .to_i64()
            .ok_or_else(|| ModelError::InvalidValue(format!("{} does not fit in i64", self.raw)))
    }

    /// Returns the quantized value as a float.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the value has no float representation.
    pub fn to_f64(&self) -> ModelResult<f64> {
        self.raw
            .to_f64()
            .ok_or_else(|| ModelError::InvalidValue(format!("{} does not fit in f64", self.raw)))
    }

    /// Returns whether the value is non-zero.
    #[must_use]
    pub fn to_bool(&self) -> bool {
        !self.raw.is_zero()
    }

    /// Re-expresses this quantity in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] when converting between atomic units of
    /// different families, or [`ModelError::IncompatibleUnits`] if this value has no unit or the
    /// composite units do not match.
    pub fn convert_to(&self, unit: impl Into<UnitAny>) -> ModelResult<Self> {
        let target = unit.into();
        let Some(current) = &self.unit else {
            return Err(ModelError::incompatible("1", &target));
        };

        if let (UnitAny::Atomic(from), UnitAny::Atomic(to)) = (current, &target) {
            let (factor, to) = from.convert(to)?;
            let raw = self
                .raw
                .checked_mul(factor)
                .ok_or_else(|| ModelError::overflow("unit conversion"))?;
            return self.derive(raw, self.decimal_places, Some(UnitAny::Atomic(to)));
        }

        let converted = current.to_combined().try_convert(&target)?;
        let expected = target.to_combined();
        if converted != expected {
            return Err(ModelError::incompatible(current, &target));
        }
        let raw = self
            .raw
            .checked_mul(converted.total_factor())
            .and_then(|raw| raw.checked_div(expected.total_factor()))
            .ok_or_else(|| ModelError::overflow("unit conversion"))?;
        self.derive(raw, self.decimal_places, UnitAny::simplify(expected))
    }

    /// Re-expresses this quantity in the storage unit of every family it involves.
    ///
    /// Unitless values are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the conversion overflows.
    pub fn to_storage_unit(&self) -> ModelResult<Self> {
        let Some(current) = &self.unit else {
            return Ok(self.clone());
        };

        let storage: Vec<Unit> = current
            .parts()
            .map(|unit| unit.catalog().storage_unit())
            .collect();
        let target = UnitAny::Combined(CombinedUnit::new_checked(storage, Vec::new(), Decimal::ONE)?);

        let converted = current.to_combined().try_convert(&target)?;
        let raw = self
            .raw
            .checked_mul(converted.total_factor())
            .ok_or_else(|| ModelError::overflow("unit conversion"))?;
        self.derive(raw, self.decimal_places, UnitAny::simplify(converted))
    }

    /// Returns this quantity of a time unit as a duration, truncated to nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IncompatibleUnits`] if the value is not in an atomic time unit, or
    /// [`ModelError::InvalidValue`] if the duration is out of range.
    pub fn to_duration(&self) -> ModelResult<TimeDelta> {
        let unit = match &self.unit {
            Some(UnitAny::Atomic(unit)) if unit.family() == UnitFamily::Time => unit,
            other => {
                let unit = other.as_ref().map_or_else(|| "1".to_string(), ToString::to_string);
                return Err(ModelError::incompatible(unit, "s"));
            }
        };

        let out_of_range =
            || ModelError::InvalidValue(format!("{self} is out of range for a duration"));
        let seconds = self
            .raw
            .checked_mul(unit.factor())
            .ok_or_else(out_of_range)?;
        let whole = seconds.trunc();
        let nanos = ((seconds - whole) * NANOS_PER_SECOND)
            .trunc()
            .to_i64()
            .ok_or_else(out_of_range)?;
        let whole = whole.to_i64().ok_or_else(out_of_range)?;

        TimeDelta::try_seconds(whole)
            .and_then(|delta| delta.checked_add(&TimeDelta::nanoseconds(nanos)))
            .ok_or_else(out_of_range)
    }
}

fn check_time_unit(unit: &Unit) -> ModelResult<()> {
    if unit.family() != UnitFamily::Time {
        return Err(ModelError::incompatible(unit, "s"));
    }
    Ok(())
}

/// Interprets an operand as a decimal number.
pub(crate) fn decimal_from_operand(operand: &Operand) -> ModelResult<Decimal> {
    match operand {
        Operand::Int(value) => Ok(Decimal::from(*value)),
        Operand::Float(value) => f64_to_decimal(*value),
        Operand::Decimal(value) => Ok(*value),
        Operand::Text(text) => parse_decimal(text),
        Operand::Bool(value) => Ok(Decimal::from(u8::from(*value))),
        Operand::Value(Value::Number(number)) => Ok(number.raw),
        Operand::Value(Value::String(text)) => parse_decimal(text.as_str()),
        Operand::Value(Value::Boolean(value)) => Ok(Decimal::from(u8::from(value.raw()))),
        other => Err(ModelError::InvalidValue(format!(
            "cannot interpret {} as a decimal number",
            other.type_name()
        ))),
    }
}

impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl PartialOrd for NumberValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.raw.cmp(&other.raw))
    }
}

impl Display for NumberValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {unit}", self.raw),
            None => write!(f, "{}", self.raw),
        }
    }
}
