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

//! The right-hand side of value construction, casts and operations.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use databucket_core::datetime::naive_to_utc;
use rust_decimal::Decimal;

use crate::values::{BooleanValue, DateTimeValue, DateValue, NumberValue, StringValue, Value};

/// Any primitive or [`Value`] accepted where a value is constructed or combined.
#[derive(Clone, Debug)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Value(Value),
}

impl Operand {
    /// Returns a short upper-case name of the operand type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Int(_) => "INT".to_string(),
            Self::Float(_) => "FLOAT".to_string(),
            Self::Decimal(_) => "DECIMAL".to_string(),
            Self::Text(_) => "TEXT".to_string(),
            Self::Bool(_) => "BOOL".to_string(),
            Self::Date(_) => "DATE".to_string(),
            Self::DateTime(_) => "DATE_TIME".to_string(),
            Self::Duration(_) => "DURATION".to_string(),
            Self::Value(value) => value.kind().to_string(),
        }
    }

    /// Replaces a wrapped [`Value`] by its raw primitive.
    #[must_use]
    pub fn into_primitive(self) -> Self {
        match self {
            Self::Value(Value::Number(v)) => Self::Decimal(v.raw()),
            Self::Value(Value::String(v)) => Self::Text(v.as_str().to_string()),
            Self::Value(Value::Boolean(v)) => Self::Bool(v.raw()),
            Self::Value(Value::Date(v)) => Self::Date(v.raw()),
            Self::Value(Value::DateTime(v)) => Self::DateTime(v.raw()),
            other => other,
        }
    }
}

macro_rules! impl_from_primitive {
    ($variant:ident, $($ty:ty => $conv:expr),+ $(,)?) => {
        $(
            impl From<$ty> for Operand {
                #[allow(clippy::redundant_closure_call)]
                fn from(value: $ty) -> Self {
                    Self::$variant(($conv)(value))
                }
            }
        )+
    };
}

impl_from_primitive!(Int, i32 => i64::from, i64 => |v| v, u32 => i64::from, u8 => i64::from);
impl_from_primitive!(Float, f64 => |v| v);
impl_from_primitive!(Decimal, Decimal => |v| v);
impl_from_primitive!(Text, &str => str::to_string, String => |v| v, &String => String::clone);
impl_from_primitive!(Bool, bool => |v| v);
impl_from_primitive!(Date, NaiveDate => |v| v);
impl_from_primitive!(
    DateTime,
    DateTime<FixedOffset> => |v| v,
    DateTime<Utc> => |v: DateTime<Utc>| v.fixed_offset(),
    NaiveDateTime => naive_to_utc,
);
impl_from_primitive!(Duration, TimeDelta => |v| v);

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::$variant(value))
                }
            }

            impl From<&$ty> for Operand {
                fn from(value: &$ty) -> Self {
                    Self::Value(Value::$variant(value.clone()))
                }
            }
        )+
    };
}

impl_from_value!(
    NumberValue => Number,
    StringValue => String,
    BooleanValue => Boolean,
    DateValue => Date,
    DateTimeValue => DateTime,
);

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&Value> for Operand {
    fn from(value: &Value) -> Self {
        Self::Value(value.clone())
    }
}

impl From<&Operand> for Operand {
    fn from(value: &Operand) -> Self {
        value.clone()
    }
}
