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

//! Error types for the unit algebra and value family.
//!
//! Every failure of a unit conversion, value construction, cast or arithmetic operation is a
//! [`ModelError`]. None of them are recoverable inside the model: they are always returned to
//! the caller, which decides how to present them.

use thiserror::Error;

use crate::enums::UnitFamily;

/// Result alias for operations that may produce a [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by units and values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The input cannot be parsed into the target primitive, or the arithmetic overflowed.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The requested number of decimal places is outside the supported range.
    #[error("invalid precision {precision}, must be in range [0, {max}]")]
    InvalidPrecision { precision: u32, max: u8 },

    /// The unit argument does not name a unit or a composite of units.
    #[error("invalid unit type: {0}")]
    InvalidUnitType(String),

    /// A conversion between units of different dimension families was attempted.
    #[error("dimension mismatch: cannot convert {from} ({from_family}) into {to} ({to_family})")]
    DimensionMismatch {
        from: String,
        from_family: UnitFamily,
        to: String,
        to_family: UnitFamily,
    },

    /// Two quantities with irreconcilable units were combined.
    #[error("incompatible units: {left} and {right}")]
    IncompatibleUnits { left: String, right: String },

    /// A value was raised to an exponent carrying a unit.
    #[error("invalid exponent: exponent must be unitless, had unit {0}")]
    InvalidExponent(String),

    /// No operation or cast is defined between the given kinds.
    #[error("unsupported operation: {op} between {left} and {right}")]
    UnsupportedOperation {
        op: String,
        left: String,
        right: String,
    },

    /// The input cannot be interpreted as a date or date-time.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The divisor of a division or remainder is zero.
    #[error("division by zero")]
    DivisionByZero,
}

impl ModelError {
    /// Creates an [`ModelError::UnsupportedOperation`] from displayable parts.
    pub fn unsupported(
        op: impl ToString,
        left: impl ToString,
        right: impl ToString,
    ) -> Self {
        Self::UnsupportedOperation {
            op: op.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Creates an [`ModelError::IncompatibleUnits`] from displayable parts.
    pub fn incompatible(left: impl ToString, right: impl ToString) -> Self {
        Self::IncompatibleUnits {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub(crate) fn overflow(op: impl std::fmt::Display) -> Self {
        Self::InvalidValue(format!("arithmetic overflow in {op}"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_display_messages() {
        let err = ModelError::InvalidPrecision {
            precision: 12,
            max: 9,
        };
        assert_eq!(
            err.to_string(),
            "invalid precision 12, must be in range [0, 9]"
        );

        let err = ModelError::DimensionMismatch {
            from: "m".to_string(),
            from_family: UnitFamily::Length,
            to: "kg".to_string(),
            to_family: UnitFamily::Weight,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: cannot convert m (LENGTH) into kg (WEIGHT)"
        );
    }

    #[rstest]
    fn test_helpers() {
        assert_eq!(
            ModelError::unsupported("ADD", "STRING", "DATE").to_string(),
            "unsupported operation: ADD between STRING and DATE"
        );
        assert_eq!(
            ModelError::incompatible("m", "kg").to_string(),
            "incompatible units: m and kg"
        );
        assert_eq!(
            ModelError::overflow("MUL").to_string(),
            "invalid value: arithmetic overflow in MUL"
        );
    }
}
