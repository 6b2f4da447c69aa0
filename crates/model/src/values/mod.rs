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

//! Typed values produced by record fields.
//!
//! A [`Value`] is one of a closed set of kinds ([`ValueKind`]): a fixed-precision
//! [`NumberValue`] with an optional unit, a [`StringValue`], a [`BooleanValue`], a [`DateValue`]
//! or a [`DateTimeValue`]. Values are immutable; every operation returns a new value. Operations
//! and comparisons between values are dispatched by [`Value::apply`], [`Value::compare`] and
//! [`Value::apply_unary`], and any primitive or value on the right-hand side is accepted as an
//! [`Operand`].

pub mod boolean;
pub mod date;
pub mod datetime;
pub mod dispatch;
pub mod number;
pub mod operand;
pub mod string;

use std::{fmt::Display, sync::Arc};

use rust_decimal::Decimal;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    enums::ValueKind,
    error::{ModelError, ModelResult},
    field::FieldInfo,
    types::FIXED_PRECISION,
};

// Re-exports
pub use crate::values::{
    boolean::{BooleanValue, parse_bool},
    date::DateValue,
    datetime::DateTimeValue,
    number::NumberValue,
    operand::Operand,
    string::StringValue,
};

/// A value of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(NumberValue),
    String(StringValue),
    Boolean(BooleanValue),
    Date(DateValue),
    DateTime(DateTimeValue),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Date(_) => ValueKind::Date,
            Self::DateTime(_) => ValueKind::DateTime,
        }
    }

    /// Returns the field that produced this value, if any and still alive.
    #[must_use]
    pub fn connected_field(&self) -> Option<Arc<FieldInfo>> {
        match self {
            Self::Number(v) => v.connected_field(),
            Self::String(v) => v.connected_field(),
            Self::Boolean(v) => v.connected_field(),
            Self::Date(v) => v.connected_field(),
            Self::DateTime(v) => v.connected_field(),
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&NumberValue> {
        match self {
            Self::Number(number) => Some(number),
            _ => None,
        }
    }

    /// Returns the value as an integer.
    ///
    /// Numbers are truncated, booleans give 0/1, text is parsed and date-times give UNIX
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] for dates, or an error if the conversion
    /// fails.
    pub fn to_i64(&self) -> ModelResult<i64> {
        match self {
            Self::Number(v) => v.to_i64(),
            Self::String(v) => v.to_i64(),
            Self::Boolean(v) => Ok(v.to_i64()),
            Self::Date(_) => Err(cast_unsupported(ValueKind::Date, "INT")),
            Self::DateTime(v) => Ok(v.to_i64()),
        }
    }

    /// Returns the value as a float.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] for dates, or an error if the conversion
    /// fails.
    pub fn to_f64(&self) -> ModelResult<f64> {
        match self {
            Self::Number(v) => v.to_f64(),
            Self::String(v) => v.to_f64(),
            Self::Boolean(v) => Ok(v.to_f64()),
            Self::Date(_) => Err(cast_unsupported(ValueKind::Date, "FLOAT")),
            Self::DateTime(v) => Ok(v.to_f64()),
        }
    }

    /// Returns the truth value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] for dates, date-times and text that is not boolean.
    pub fn to_bool(&self) -> ModelResult<bool> {
        boolean::bool_from_operand(&Operand::from(self))
    }

    /// Casts this value into a value of `kind`.
    ///
    /// | From \ To | Number | String | Boolean | Date | DateTime |
    /// |-----------|--------|--------|---------|------|----------|
    /// | Number    | same   | text   | non-zero | -   | UNIX seconds (unitless only) |
    /// | String    | parse  | same   | parse   | ISO  | ISO      |
    /// | Boolean   | 0/1    | text   | same    | -    | -        |
    /// | Date      | -      | ISO    | -       | same | midnight UTC |
    /// | DateTime  | UNIX seconds | ISO | -    | date part | same |
    ///
    /// The field link is dropped except when `kind` is the current kind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] for the pairs marked `-`, or the error of
    /// the target constructor if the conversion fails.
    pub fn cast_to(&self, kind: ValueKind) -> ModelResult<Self> {
        if kind == self.kind() {
            return Ok(self.clone());
        }

        let operand = Operand::from(self);
        match (self, kind) {
            (_, ValueKind::String) => Ok(Self::String(StringValue::new(operand))),
            (Self::Boolean(v), ValueKind::Number) => {
                NumberValue::new_checked(v.to_i64(), 0, None).map(Self::Number)
            }
            (Self::String(_), ValueKind::Number) => {
                NumberValue::from_operand(operand).map(Self::Number)
            }
            (Self::DateTime(v), ValueKind::Number) => {
                let raw = Decimal::from(v.raw().timestamp())
                    + Decimal::new(i64::from(v.raw().timestamp_subsec_nanos()), 9);
                NumberValue::new_checked(raw, FIXED_PRECISION, None).map(Self::Number)
            }
            (Self::Number(_) | Self::String(_), ValueKind::Boolean) => {
                BooleanValue::new_checked(operand).map(Self::Boolean)
            }
            (Self::String(_) | Self::DateTime(_), ValueKind::Date) => {
                DateValue::new_checked(operand).map(Self::Date)
            }
            (Self::Number(_) | Self::String(_) | Self::Date(_), ValueKind::DateTime) => {
                DateTimeValue::new_checked(operand).map(Self::DateTime)
            }
            _ => Err(cast_unsupported(self.kind(), kind)),
        }
    }

    /// Serializes this value into a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn cast_unsupported(from: ValueKind, to: impl ToString) -> ModelError {
    ModelError::unsupported("CAST", from, to)
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => v.fmt(f),
            Self::String(v) => v.fmt(f),
            Self::Boolean(v) => v.fmt(f),
            Self::Date(v) => v.fmt(f),
            Self::DateTime(v) => v.fmt(f),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Value", 3)?;
        state.serialize_field("kind", &self.kind())?;
        match self {
            Self::Number(v) => {
                state.serialize_field("value", &v.raw().to_string())?;
                state.serialize_field("unit", &v.unit())?;
            }
            Self::String(v) => {
                state.serialize_field("value", v.as_str())?;
                state.serialize_field("unit", &None::<String>)?;
            }
            Self::Boolean(v) => {
                state.serialize_field("value", &v.raw())?;
                state.serialize_field("unit", &None::<String>)?;
            }
            Self::Date(v) => {
                state.serialize_field("value", &v.to_string())?;
                state.serialize_field("unit", &None::<String>)?;
            }
            Self::DateTime(v) => {
                state.serialize_field("value", &v.to_string())?;
                state.serialize_field("unit", &None::<String>)?;
            }
        }
        state.end()
    }
}

macro_rules! impl_into_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_into_value!(
    NumberValue => Number,
    StringValue => String,
    BooleanValue => Boolean,
    DateValue => Date,
    DateTimeValue => DateTime,
);
