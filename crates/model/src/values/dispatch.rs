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

//! The operator dispatch table over [`Value`].
//!
//! | Kind      | Binary operators                          | Unary operators                      |
//! |-----------|-------------------------------------------|--------------------------------------|
//! | Number    | `+ - * / // % **`                         | `neg pos abs invert floor ceil`      |
//! | String    | `+` (concatenation), `*` (repetition)     | -                                    |
//! | Boolean   | `and or xor`                              | `not`                                |
//! | Date      | `+ -` with a duration, `-` with a date    | -                                    |
//! | DateTime  | `+ -` with a duration, `-` with a date-time | -                                  |
//!
//! Every kind supports the six comparison operators except Boolean, which supports `==` and
//! `!=` only. Any other combination fails with [`ModelError::UnsupportedOperation`].

use crate::{
    enums::{BinaryOp, CompareOp, UnaryOp},
    error::{ModelError, ModelResult},
    types::FIXED_PRECISION,
    units::time,
    values::{BooleanValue, NumberValue, Operand, Value},
};

impl Value {
    /// Applies the binary operator `op` with `rhs` as the right operand.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] if `op` is not defined for the kind of this
    /// value and `rhs`, or the error of the underlying operation.
    pub fn apply(&self, op: BinaryOp, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let rhs = rhs.into();
        let unsupported = || ModelError::unsupported(op, self.kind(), rhs.type_name());

        match self {
            Self::Number(number) => {
                if is_temporal(&rhs) {
                    return Err(unsupported());
                }
                let result = match op {
                    BinaryOp::Add => number.add(&rhs),
                    BinaryOp::Sub => number.sub(&rhs),
                    BinaryOp::Mul => number.mul(&rhs),
                    BinaryOp::Div => number.div(&rhs),
                    BinaryOp::FloorDiv => number.floor_div(&rhs),
                    BinaryOp::Mod => number.rem(&rhs),
                    BinaryOp::Pow => number.pow(&rhs),
                    BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => return Err(unsupported()),
                };
                result.map(Self::Number)
            }
            Self::String(text) => match op {
                BinaryOp::Add => Ok(Self::String(text.concat(&rhs))),
                BinaryOp::Mul => text.repeat(&rhs).map(Self::String),
                _ => Err(unsupported()),
            },
            Self::Boolean(flag) => {
                let result = match op {
                    BinaryOp::And => flag.and(&rhs)?,
                    BinaryOp::Or => flag.or(&rhs)?,
                    BinaryOp::Xor => flag.xor(&rhs)?,
                    _ => return Err(unsupported()),
                };
                Ok(Self::Boolean(BooleanValue::new(result)))
            }
            Self::Date(date) => match op {
                BinaryOp::Add => date.add(&rhs).map(Self::Date),
                BinaryOp::Sub if is_temporal_point(&rhs) => {
                    let days = date.since(&rhs)?.num_days();
                    NumberValue::new_checked(days, 0, Some((&time().day).into())).map(Self::Number)
                }
                BinaryOp::Sub => date.sub(&rhs).map(Self::Date),
                _ => Err(unsupported()),
            },
            Self::DateTime(dt) => match op {
                BinaryOp::Add => dt.add(&rhs).map(Self::DateTime),
                BinaryOp::Sub if is_temporal_point(&rhs) => {
                    NumberValue::from_duration(dt.since(&rhs)?, &time().second, FIXED_PRECISION)
                        .map(Self::Number)
                }
                BinaryOp::Sub => dt.sub(&rhs).map(Self::DateTime),
                _ => Err(unsupported()),
            },
        }
    }

    /// Compares this value with `rhs` using `op`.
    ///
    /// Numbers compare raw quantized values, ignoring units.
    ///
    /// # Errors
    ///
    /// Returns an error if `rhs` cannot be coerced to the kind of this value, or
    /// [`ModelError::UnsupportedOperation`] for ordering comparisons of booleans.
    pub fn compare(&self, op: CompareOp, rhs: impl Into<Operand>) -> ModelResult<bool> {
        match self {
            Self::Number(number) => number.compare(op, rhs),
            Self::String(text) => Ok(text.compare(op, rhs)),
            Self::Boolean(flag) => flag.compare(op, rhs),
            Self::Date(date) => date.compare(op, rhs),
            Self::DateTime(dt) => dt.compare(op, rhs),
        }
    }

    /// Applies the unary operator `op`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] if `op` is not defined for the kind of this
    /// value, or the error of the underlying operation.
    pub fn apply_unary(&self, op: UnaryOp) -> ModelResult<Self> {
        match (self, op) {
            (Self::Number(number), _) => number.apply_unary(op).map(Self::Number),
            (Self::Boolean(flag), UnaryOp::Not) => Ok(Self::Boolean(BooleanValue::new(flag.not()))),
            _ => Err(ModelError::unsupported(op, self.kind(), "")),
        }
    }
}

fn is_temporal_point(operand: &Operand) -> bool {
    matches!(
        operand,
        Operand::Date(_)
            | Operand::DateTime(_)
            | Operand::Text(_)
            | Operand::Value(Value::Date(_) | Value::DateTime(_) | Value::String(_))
    )
}

fn is_temporal(operand: &Operand) -> bool {
    matches!(
        operand,
        Operand::Date(_)
            | Operand::DateTime(_)
            | Operand::Duration(_)
            | Operand::Value(Value::Date(_) | Value::DateTime(_))
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        stubs::{meters, unitless},
        units::{UnitAny, length, weight},
        values::{DateTimeValue, DateValue, StringValue},
    };

    fn quantity(raw: i64, dp: u8, unit: &crate::units::Unit) -> Value {
        Value::from(NumberValue::new(raw, dp, Some(UnitAny::from(unit))))
    }

    #[rstest]
    fn test_meter_plus_millimeter_keeps_left_unit() {
        let sum = quantity(1, 3, &length().meter)
            .apply(BinaryOp::Add, quantity(1, 3, &length().millimeter))
            .unwrap();
        assert_eq!(sum.to_string(), "1.001 m");
    }

    #[rstest]
    fn test_meter_plus_kilogram_fails() {
        let result = quantity(1, 0, &length().meter).apply(BinaryOp::Add, quantity(1, 0, &weight().kilogram));
        assert!(matches!(result, Err(ModelError::IncompatibleUnits { .. })));
    }

    #[rstest]
    fn test_multiply_by_unitless_is_identity(meters: NumberValue, unitless: NumberValue) {
        let value = Value::from(meters.clone());
        let product = value.apply(BinaryOp::Mul, NumberValue::new(1, 0, None)).unwrap();
        assert_eq!(product, value);
        assert_eq!(product.as_number().unwrap().unit(), meters.unit());

        let doubled = value.apply(BinaryOp::Mul, &unitless).unwrap();
        assert_eq!(doubled.as_number().unwrap().raw(), dec!(24.691356));
    }

    #[rstest]
    fn test_add_then_subtract_round_trips(meters: NumberValue) {
        let value = Value::from(meters);
        let other = quantity(250, 2, &length().centimeter);
        let back = value
            .apply(BinaryOp::Add, &other)
            .and_then(|sum| sum.apply(BinaryOp::Sub, &other))
            .unwrap();
        assert_eq!(back, value);
    }

    #[rstest]
    #[case(BinaryOp::Div, "2.000 m/s")]
    #[case(BinaryOp::Mul, "8.000 m*s")]
    fn test_number_units_combine(#[case] op: BinaryOp, #[case] expected: &str) {
        let distance = quantity(4, 3, &length().meter);
        let result = distance.apply(op, quantity(2, 0, &time().second)).unwrap();
        assert_eq!(result.to_string(), expected);
    }

    #[rstest]
    #[case(BinaryOp::Mul)]
    #[case(BinaryOp::Div)]
    #[case(BinaryOp::Add)]
    #[case(BinaryOp::Mod)]
    fn test_unit_factor_overflow_is_an_error(#[case] op: BinaryOp) {
        let cubic_nm = Value::from(NumberValue::with_unit_expr(1, 0, "nm^3").unwrap());
        let cubic_km = NumberValue::with_unit_expr(1, 0, "km^3").unwrap();
        let result = cubic_nm.apply(op, cubic_km);
        assert!(matches!(result, Err(ModelError::InvalidValue(_))));
    }

    #[rstest]
    fn test_floor_div_truncates_toward_zero() {
        let value = Value::from(NumberValue::new(-7, 0, None));
        let result = value.apply(BinaryOp::FloorDiv, 2).unwrap();
        assert_eq!(result.as_number().unwrap().raw(), dec!(-3));
    }

    #[rstest]
    fn test_string_repeat_huge_count_is_an_error() {
        let text = Value::from(StringValue::new("ab"));
        let result = text.apply(BinaryOp::Mul, i64::MAX);
        assert!(matches!(result, Err(ModelError::InvalidValue(_))));
    }

    #[rstest]
    #[case(BinaryOp::FloorDiv, dec!(3))]
    #[case(BinaryOp::Mod, dec!(1))]
    #[case(BinaryOp::Pow, dec!(343))]
    fn test_number_integer_operators(#[case] op: BinaryOp, #[case] expected: rust_decimal::Decimal) {
        let value = Value::from(NumberValue::new(7, 0, None));
        let result = value.apply(op, if op == BinaryOp::Pow { 3 } else { 2 }).unwrap();
        assert_eq!(result.as_number().unwrap().raw(), expected);
    }

    #[rstest]
    fn test_number_rejects_logic_and_temporal_operands(unitless: NumberValue) {
        let value = Value::from(unitless);
        assert!(matches!(
            value.apply(BinaryOp::And, true),
            Err(ModelError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            value.apply(BinaryOp::Add, TimeDelta::seconds(1)),
            Err(ModelError::UnsupportedOperation { .. })
        ));
    }

    #[rstest]
    fn test_string_operators() {
        let text = Value::from(StringValue::new("a"));
        assert_eq!(text.apply(BinaryOp::Mul, 3).unwrap().to_string(), "aaa");
        assert_eq!(text.apply(BinaryOp::Add, "b").unwrap().to_string(), "ab");
        assert!(matches!(
            text.apply(BinaryOp::Sub, "a"),
            Err(ModelError::UnsupportedOperation { .. })
        ));
    }

    #[rstest]
    fn test_boolean_operators_are_logical() {
        let yes = Value::from(BooleanValue::new(1));
        let no = Value::from(BooleanValue::new(0));
        assert_eq!(yes.apply(BinaryOp::And, &no).unwrap(), Value::from(BooleanValue::new(false)));
        assert_eq!(yes.apply(BinaryOp::Or, &no).unwrap(), Value::from(BooleanValue::new(true)));
        assert_eq!(yes.apply(BinaryOp::Xor, &yes).unwrap(), Value::from(BooleanValue::new(false)));
        assert!(yes.apply(BinaryOp::Add, &no).is_err());
    }

    #[rstest]
    fn test_date_operators() {
        let date = Value::from(DateValue::new("2024-03-01"));
        let next = date.apply(BinaryOp::Add, TimeDelta::days(1)).unwrap();
        assert_eq!(next.to_string(), "2024-03-02");

        let elapsed = date.apply(BinaryOp::Sub, DateValue::new("2024-02-01")).unwrap();
        assert_eq!(elapsed.to_string(), "29 d");

        let earlier = date.apply(BinaryOp::Sub, TimeDelta::days(1)).unwrap();
        assert_eq!(earlier.to_string(), "2024-02-29");

        assert!(matches!(
            date.apply(BinaryOp::Mul, 2),
            Err(ModelError::UnsupportedOperation { .. })
        ));
    }

    #[rstest]
    fn test_datetime_operators() {
        let start = Value::from(DateTimeValue::new("2024-03-01T10:00:00Z"));
        let end = start.apply(BinaryOp::Add, TimeDelta::milliseconds(1_500)).unwrap();
        assert_eq!(end.to_string(), "2024-03-01T10:00:01.500Z");

        let elapsed = end.apply(BinaryOp::Sub, &start).unwrap();
        let seconds = elapsed.as_number().unwrap();
        assert_eq!(seconds.raw(), dec!(1.5));
        assert_eq!(seconds.unit(), Some(&UnitAny::from(&time().second)));
    }

    #[rstest]
    fn test_compare_dispatch(meters: NumberValue) {
        let value = Value::from(meters);
        assert!(value.compare(CompareOp::Gt, 12).unwrap());
        assert!(Value::from(StringValue::new("b")).compare(CompareOp::Ge, "a").unwrap());
        assert!(Value::from(BooleanValue::new(true)).compare(CompareOp::Ne, false).unwrap());
        assert!(Value::from(BooleanValue::new(true)).compare(CompareOp::Gt, false).is_err());
        assert!(
            Value::from(DateValue::new("2024-03-01"))
                .compare(CompareOp::Lt, "2024-03-02")
                .unwrap()
        );
    }

    #[rstest]
    fn test_unary_dispatch() {
        let value = Value::from(NumberValue::new(dec!(-2.5), 1, None));
        assert_eq!(value.apply_unary(UnaryOp::Abs).unwrap().to_string(), "2.5");
        assert_eq!(value.apply_unary(UnaryOp::Floor).unwrap().to_string(), "-3");
        assert_eq!(value.apply_unary(UnaryOp::Ceil).unwrap().to_string(), "-2");
        assert_eq!(
            Value::from(BooleanValue::new(true)).apply_unary(UnaryOp::Not).unwrap(),
            Value::from(BooleanValue::new(false))
        );
        assert!(matches!(
            Value::from(StringValue::new("x")).apply_unary(UnaryOp::Neg),
            Err(ModelError::UnsupportedOperation { .. })
        ));
    }
}
