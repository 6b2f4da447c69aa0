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

//! Functions for handling fixed-precision decimal values.
//!
//! Every [`NumberValue`](crate::values::NumberValue) stores an arbitrary-precision decimal
//! quantized to a fixed number of decimal places. This module provides the constants and
//! functions that enforce that precision strategy, ensuring consistent quantization across
//! construction, casting and arithmetic.
//!
//! # Rounding
//!
//! Quantization rounds half to even (banker's rounding), so repeated quantization of
//! already-quantized values is idempotent and does not drift.
//!
//! # Precision promotion
//!
//! When two values of different precision are combined, the result uses the maximum precision
//! of the operands (see [`max_precision`]).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};

use crate::error::{ModelError, ModelResult};

/// The maximum fixed-point precision (decimal places).
pub const FIXED_PRECISION: u8 = 9;

/// The number of decimal places used when none is declared.
pub const DEFAULT_DECIMAL_PLACES: u8 = FIXED_PRECISION;

/// Checks if a given `precision` value is within the allowed fixed-point precision range.
///
/// # Errors
///
/// Returns [`ModelError::InvalidPrecision`] if `precision` exceeds [`FIXED_PRECISION`].
pub fn check_fixed_precision(precision: u8) -> ModelResult<()> {
    if precision > FIXED_PRECISION {
        return Err(ModelError::InvalidPrecision {
            precision: u32::from(precision),
            max: FIXED_PRECISION,
        });
    }
    Ok(())
}

/// Quantizes `value` to exactly `precision` decimal places, rounding half to even.
///
/// # Errors
///
/// Returns [`ModelError::InvalidPrecision`] if `precision` exceeds [`FIXED_PRECISION`].
pub fn quantize(value: Decimal, precision: u8) -> ModelResult<Decimal> {
    check_fixed_precision(precision)?;
    let mut rounded =
        value.round_dp_with_strategy(u32::from(precision), RoundingStrategy::MidpointNearestEven);
    rounded.rescale(u32::from(precision));
    Ok(rounded)
}

/// Returns the precision used for the result of combining two values.
#[must_use]
pub fn max_precision(left: u8, right: u8) -> u8 {
    left.max(right)
}

/// Parses decimal text, accepting surrounding whitespace, `_` digit separators and
/// scientific notation (`1e-3`).
///
/// # Errors
///
/// Returns [`ModelError::InvalidValue`] if `s` is not a decimal number.
pub fn parse_decimal(s: &str) -> ModelResult<Decimal> {
    let cleaned = s.trim().replace('_', "");
    if cleaned.is_empty() {
        return Err(ModelError::InvalidValue(format!(
            "cannot interpret '{s}' as a decimal number"
        )));
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| ModelError::InvalidValue(format!("cannot interpret '{s}' as a decimal number")))
}

/// Converts an `f64` to a decimal.
///
/// # Errors
///
/// Returns [`ModelError::InvalidValue`] if `value` is NaN, infinite, or out of range.
pub fn f64_to_decimal(value: f64) -> ModelResult<Decimal> {
    if !value.is_finite() {
        return Err(ModelError::InvalidValue(format!(
            "cannot interpret {value} as a decimal number"
        )));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        ModelError::InvalidValue(format!("{value} is out of range for a decimal number"))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    fn test_precision_boundaries() {
        assert!(check_fixed_precision(0).is_ok());
        assert!(check_fixed_precision(FIXED_PRECISION).is_ok());
        assert_eq!(
            check_fixed_precision(FIXED_PRECISION + 1),
            Err(ModelError::InvalidPrecision {
                precision: 10,
                max: 9
            })
        );
    }

    #[rstest]
    #[case(dec!(1.2345), 2, "1.23")]
    #[case(dec!(1.235), 2, "1.24")]
    #[case(dec!(1.245), 2, "1.24")]
    #[case(dec!(-1.245), 2, "-1.24")]
    #[case(dec!(2.5), 0, "2")]
    #[case(dec!(3.5), 0, "4")]
    #[case(dec!(1), 3, "1.000")]
    #[case(dec!(0.1), 9, "0.100000000")]
    fn test_quantize(#[case] value: Decimal, #[case] precision: u8, #[case] expected: &str) {
        let result = quantize(value, precision).unwrap();
        assert_eq!(result.to_string(), expected);
        assert_eq!(result.scale(), u32::from(precision));
    }

    #[rstest]
    fn test_quantize_is_idempotent() {
        let once = quantize(dec!(7.123456789123), 4).unwrap();
        let twice = quantize(once, 4).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.to_string(), "7.1235");
    }

    #[rstest]
    fn test_quantize_invalid_precision() {
        assert!(matches!(
            quantize(dec!(1), 10),
            Err(ModelError::InvalidPrecision { .. })
        ));
    }

    #[rstest]
    #[case("1", dec!(1))]
    #[case(" 2.50 ", dec!(2.5))]
    #[case("-0.001", dec!(-0.001))]
    #[case("1_000", dec!(1000))]
    #[case("1e-3", dec!(0.001))]
    #[case("2.5e2", dec!(250))]
    fn test_parse_decimal(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_decimal(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1.2.3")]
    #[case("NaN")]
    fn test_parse_decimal_invalid(#[case] input: &str) {
        assert!(matches!(
            parse_decimal(input),
            Err(ModelError::InvalidValue(_))
        ));
    }

    #[rstest]
    fn test_f64_to_decimal() {
        assert_eq!(f64_to_decimal(0.25).unwrap(), dec!(0.25));
        assert!(f64_to_decimal(f64::NAN).is_err());
        assert!(f64_to_decimal(f64::INFINITY).is_err());
    }

    #[rstest]
    fn test_max_precision() {
        assert_eq!(max_precision(2, 9), 9);
        assert_eq!(max_precision(3, 0), 3);
    }
}
