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

use std::{
    cmp::Ordering,
    fmt::Display,
    sync::{Arc, Weak},
};

use databucket_core::datetime::format_iso_datetime;
use rust_decimal::prelude::ToPrimitive;

use crate::{
    enums::{BinaryOp, CompareOp, ValueKind},
    error::{ModelError, ModelResult},
    field::FieldInfo,
    values::{Operand, Value},
};

/// A text value.
#[derive(Clone, Debug)]
pub struct StringValue {
    raw: String,
    field: Option<Weak<FieldInfo>>,
}

impl StringValue {
    /// Creates a new [`StringValue`] from the text form of `value`.
    #[must_use]
    pub fn new(value: impl Into<Operand>) -> Self {
        Self {
            raw: text_from_operand(value.into()),
            field: None,
        }
    }

    /// Links this value to the field that produced it.
    #[must_use]
    pub fn with_field(mut self, field: &Arc<FieldInfo>) -> Self {
        self.field = Some(Arc::downgrade(field));
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the field that produced this value, if it is still alive.
    #[must_use]
    pub fn connected_field(&self) -> Option<Arc<FieldInfo>> {
        self.field.as_ref().and_then(Weak::upgrade)
    }

    /// Returns the concatenation of this text and the text form of `rhs`.
    #[must_use]
    pub fn concat(&self, rhs: impl Into<Operand>) -> Self {
        let rhs = text_from_operand(rhs.into());
        Self::new(format!("{}{rhs}", self.raw))
    }

    /// Returns this text repeated `count` times (empty for a non-positive count).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] if `count` is not an integer, or
    /// [`ModelError::InvalidValue`] if the repeated text cannot be allocated.
    pub fn repeat(&self, count: impl Into<Operand>) -> ModelResult<Self> {
        let count = count.into();
        let times = match &count {
            Operand::Int(n) => Some(*n),
            Operand::Decimal(n) if n.fract().is_zero() => n.to_i64(),
            Operand::Value(Value::Number(n)) if n.unit().is_none() && n.raw().fract().is_zero() => {
                n.raw().to_i64()
            }
            _ => None,
        }
        .ok_or_else(|| ModelError::unsupported(BinaryOp::Mul, ValueKind::String, count.type_name()))?;

        let too_long = || ModelError::InvalidValue(format!("cannot repeat text {times} times"));
        let count = usize::try_from(times.max(0)).map_err(|_| too_long())?;
        if count == 0 || self.raw.is_empty() {
            return Ok(Self::new(""));
        }

        let len = self.raw.len().checked_mul(count).ok_or_else(too_long)?;
        let mut text = String::new();
        text.try_reserve_exact(len).map_err(|_| too_long())?;
        for _ in 0..count {
            text.push_str(&self.raw);
        }
        Ok(Self::new(text))
    }

    /// Compares lexicographically against the text form of `rhs`.
    #[must_use]
    pub fn compare(&self, op: CompareOp, rhs: impl Into<Operand>) -> bool {
        let rhs = text_from_operand(rhs.into());
        op.matches(self.raw.as_str().cmp(rhs.as_str()))
    }

    /// Parses the trimmed text as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the text is not an integer.
    pub fn to_i64(&self) -> ModelResult<i64> {
        self.raw
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidValue(format!("cannot interpret '{}' as an integer", self.raw)))
    }

    /// Parses the trimmed text as a float.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if the text is not a number.
    pub fn to_f64(&self) -> ModelResult<f64> {
        self.raw
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidValue(format!("cannot interpret '{}' as a float", self.raw)))
    }
}

/// Returns the text form of an operand.
pub(crate) fn text_from_operand(operand: Operand) -> String {
    match operand {
        Operand::Int(value) => value.to_string(),
        Operand::Float(value) => value.to_string(),
        Operand::Decimal(value) => value.to_string(),
        Operand::Text(text) => text,
        Operand::Bool(value) => value.to_string(),
        Operand::Date(date) => date.to_string(),
        Operand::DateTime(dt) => format_iso_datetime(&dt),
        Operand::Duration(delta) => delta.to_string(),
        Operand::Value(Value::String(text)) => text.raw,
        Operand::Value(value) => value.to_string(),
    }
}

impl PartialEq for StringValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for StringValue {}

impl PartialOrd for StringValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StringValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Display for StringValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
