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
    fmt::Display,
    sync::{Arc, Weak},
};

use databucket_core::correctness::FAILED;

use crate::{
    enums::{CompareOp, ValueKind},
    error::{ModelError, ModelResult},
    field::FieldInfo,
    values::{Operand, Value},
};

/// A boolean value.
#[derive(Clone, Debug)]
pub struct BooleanValue {
    raw: bool,
    field: Option<Weak<FieldInfo>>,
}

impl BooleanValue {
    /// Creates a new [`BooleanValue`] instance with correctness checking.
    ///
    /// Numbers are true when non-zero. Text accepts `true/false/1/0/yes/no` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `value` has no truth value.
    pub fn new_checked(value: impl Into<Operand>) -> ModelResult<Self> {
        Ok(Self {
            raw: bool_from_operand(&value.into())?,
            field: None,
        })
    }

    /// Creates a new [`BooleanValue`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `value` has no truth value.
    #[must_use]
    pub fn new(value: impl Into<Operand>) -> Self {
        Self::new_checked(value).expect(FAILED)
    }

    /// Links this value to the field that produced it.
    #[must_use]
    pub fn with_field(mut self, field: &Arc<FieldInfo>) -> Self {
        self.field = Some(Arc::downgrade(field));
        self
    }

    #[must_use]
    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Returns the field that produced this value, if it is still alive.
    #[must_use]
    pub fn connected_field(&self) -> Option<Arc<FieldInfo>> {
        self.field.as_ref().and_then(Weak::upgrade)
    }

    /// Returns the logical AND with the truth value of `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `rhs` has no truth value.
    pub fn and(&self, rhs: impl Into<Operand>) -> ModelResult<bool> {
        Ok(self.raw && bool_from_operand(&rhs.into())?)
    }

    /// Returns the logical OR with the truth value of `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `rhs` has no truth value.
    pub fn or(&self, rhs: impl Into<Operand>) -> ModelResult<bool> {
        Ok(self.raw || bool_from_operand(&rhs.into())?)
    }

    /// Returns the logical XOR with the truth value of `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] if `rhs` has no truth value.
    pub fn xor(&self, rhs: impl Into<Operand>) -> ModelResult<bool> {
        Ok(self.raw ^ bool_from_operand(&rhs.into())?)
    }

    #[must_use]
    pub fn not(&self) -> bool {
        !self.raw
    }

    /// Compares truth values. Only equality operators are defined.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] for ordering operators, or
    /// [`ModelError::InvalidValue`] if `rhs` has no truth value.
    pub fn compare(&self, op: CompareOp, rhs: impl Into<Operand>) -> ModelResult<bool> {
        let rhs = rhs.into();
        match op {
            CompareOp::Eq => Ok(self.raw == bool_from_operand(&rhs)?),
            CompareOp::Ne => Ok(self.raw != bool_from_operand(&rhs)?),
            _ => Err(ModelError::unsupported(
                op,
                ValueKind::Boolean,
                rhs.type_name(),
            )),
        }
    }

    #[must_use]
    pub fn to_i64(&self) -> i64 {
        i64::from(self.raw)
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        f64::from(u8::from(self.raw))
    }
}

/// Parses boolean text: `true/false/1/0/yes/no`, case-insensitive.
///
/// # Errors
///
/// Returns [`ModelError::InvalidValue`] for any other text.
pub fn parse_bool(text: &str) -> ModelResult<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ModelError::InvalidValue(format!(
            "cannot interpret '{text}' as a boolean"
        ))),
    }
}

pub(crate) fn bool_from_operand(operand: &Operand) -> ModelResult<bool> {
    match operand {
        Operand::Bool(value) => Ok(*value),
        Operand::Int(value) => Ok(*value != 0),
        Operand::Float(value) => Ok(*value != 0.0),
        Operand::Decimal(value) => Ok(!value.is_zero()),
        Operand::Text(text) => parse_bool(text),
        Operand::Duration(delta) => Ok(!delta.is_zero()),
        Operand::Value(Value::Boolean(value)) => Ok(value.raw),
        Operand::Value(Value::Number(number)) => Ok(number.to_bool()),
        Operand::Value(Value::String(text)) => parse_bool(text.as_str()),
        other => Err(ModelError::InvalidValue(format!(
            "cannot interpret {} as a boolean",
            other.type_name()
        ))),
    }
}

impl PartialEq for BooleanValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for BooleanValue {}

impl Display for BooleanValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
