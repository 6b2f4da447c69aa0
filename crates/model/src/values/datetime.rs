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

use chrono::{DateTime, FixedOffset, TimeDelta};
use databucket_core::{
    correctness::FAILED,
    datetime::{date_to_midnight_utc, format_iso_datetime, parse_iso_datetime, unix_secs, unix_secs_f64},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_decimal_macros::dec;

use crate::{
    enums::{BinaryOp, CompareOp, ValueKind},
    error::{ModelError, ModelResult},
    field::FieldInfo,
    types::fixed::f64_to_decimal,
    values::{Operand, Value, date::duration_from_operand},
};

/// A timestamp which always carries a UTC offset.
///
/// Naive inputs are interpreted as UTC. Equality and ordering compare instants, so the same
/// instant in two offsets is equal.
#[derive(Clone, Debug)]
pub struct DateTimeValue {
    raw: DateTime<FixedOffset>,
    field: Option<Weak<FieldInfo>>,
}

impl DateTimeValue {
    /// Creates a new [`DateTimeValue`] instance with correctness checking.
    ///
    /// Accepts ISO 8601 text, a date (midnight UTC), a date-time, or a number of UNIX seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDate`] if `value` cannot be interpreted as a timestamp.
    pub fn new_checked(value: impl Into<Operand>) -> ModelResult<Self> {
        Ok(Self {
            raw: datetime_from_operand(&value.into())?,
            field: None,
        })
    }

    /// Creates a new [`DateTimeValue`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be interpreted as a timestamp.
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
    pub fn raw(&self) -> DateTime<FixedOffset> {
        self.raw
    }

    /// Returns the field that produced this value, if it is still alive.
    #[must_use]
    pub fn connected_field(&self) -> Option<Arc<FieldInfo>> {
        self.field.as_ref().and_then(Weak::upgrade)
    }

    /// Returns the timestamp `rhs` later, keeping the offset.
    ///
    /// `rhs` is a duration or a [`NumberValue`](crate::values::NumberValue) in a time unit.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] if `rhs` is not a duration, or
    /// [`ModelError::InvalidDate`] if the result is out of range.
    pub fn add(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let delta = duration_from_operand(&rhs.into(), BinaryOp::Add, ValueKind::DateTime)?;
        self.shifted(self.raw.checked_add_signed(delta))
    }

    /// Returns the timestamp `rhs` earlier, keeping the offset.
    ///
    /// # Errors
    ///
    /// As for [`DateTimeValue::add`].
    pub fn sub(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let delta = duration_from_operand(&rhs.into(), BinaryOp::Sub, ValueKind::DateTime)?;
        self.shifted(self.raw.checked_sub_signed(delta))
    }

    fn shifted(&self, dt: Option<DateTime<FixedOffset>>) -> ModelResult<Self> {
        dt.map(|raw| Self { raw, field: None }).ok_or_else(|| {
            ModelError::InvalidDate(format!(
                "date-time arithmetic on {} out of range",
                format_iso_datetime(&self.raw)
            ))
        })
    }

    /// Returns the duration elapsed since `other` (negative if `other` is later).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDate`] if `other` cannot be interpreted as a timestamp.
    pub fn since(&self, other: impl Into<Operand>) -> ModelResult<TimeDelta> {
        let other = datetime_from_operand(&other.into())?;
        Ok(self.raw.signed_duration_since(other))
    }

    /// Compares instants against `rhs` interpreted as a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDate`] if `rhs` cannot be interpreted as a timestamp.
    pub fn compare(&self, op: CompareOp, rhs: impl Into<Operand>) -> ModelResult<bool> {
        let rhs = datetime_from_operand(&rhs.into())?;
        Ok(op.matches(self.raw.cmp(&rhs)))
    }

    /// Returns the whole UNIX seconds.
    #[must_use]
    pub fn to_i64(&self) -> i64 {
        unix_secs(&self.raw)
    }

    /// Returns the UNIX seconds including the fractional part.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        unix_secs_f64(&self.raw)
    }
}

pub(crate) fn datetime_from_operand(operand: &Operand) -> ModelResult<DateTime<FixedOffset>> {
    match operand {
        Operand::DateTime(dt) => Ok(*dt),
        Operand::Date(date) => Ok(date_to_midnight_utc(*date)),
        Operand::Text(text) => parse_datetime_text(text),
        Operand::Int(secs) => from_unix_secs(Decimal::from(*secs)),
        Operand::Float(secs) => from_unix_secs(f64_to_decimal(*secs)?),
        Operand::Decimal(secs) => from_unix_secs(*secs),
        Operand::Value(Value::DateTime(dt)) => Ok(dt.raw),
        Operand::Value(Value::Date(date)) => Ok(date_to_midnight_utc(date.raw())),
        Operand::Value(Value::String(text)) => parse_datetime_text(text.as_str()),
        Operand::Value(Value::Number(number)) if number.unit().is_none() => {
            from_unix_secs(number.raw())
        }
        other => Err(ModelError::InvalidDate(format!(
            "cannot interpret {} as a date-time",
            other.type_name()
        ))),
    }
}

fn parse_datetime_text(text: &str) -> ModelResult<DateTime<FixedOffset>> {
    parse_iso_datetime(text).map_err(|e| ModelError::InvalidDate(e.to_string()))
}

fn from_unix_secs(secs: Decimal) -> ModelResult<DateTime<FixedOffset>> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * dec!(1000000000)).trunc();
    whole
        .to_i64()
        .zip(nanos.to_u32())
        .and_then(|(secs, nanos)| DateTime::from_timestamp(secs, nanos))
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| ModelError::InvalidDate(format!("{secs} UNIX seconds out of range")))
}

impl PartialEq for DateTimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for DateTimeValue {}

impl PartialOrd for DateTimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Display for DateTimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_iso_datetime(&self.raw))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};
    use rstest::rstest;

    use super::*;
    use crate::{
        units::{UnitAny, time},
        values::NumberValue,
    };

    #[rstest]
    #[case(Operand::from("2024-03-15T10:00:00Z"), "2024-03-15T10:00:00Z")]
    #[case(Operand::from("2024-03-15 10:00:00"), "2024-03-15T10:00:00Z")]
    #[case(Operand::from("2024-03-15T12:00:00+02:00"), "2024-03-15T12:00:00+02:00")]
    #[case(Operand::from(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()), "2024-03-15T00:00:00Z")]
    #[case(Operand::from(0), "1970-01-01T00:00:00Z")]
    #[case(Operand::from(dec!(1.5)), "1970-01-01T00:00:01.500Z")]
    fn test_new_checked(#[case] value: Operand, #[case] expected: &str) {
        assert_eq!(DateTimeValue::new_checked(value).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case(Operand::from("not a date"))]
    #[case(Operand::from(true))]
    fn test_new_checked_invalid(#[case] value: Operand) {
        assert!(matches!(
            DateTimeValue::new_checked(value),
            Err(ModelError::InvalidDate(_))
        ));
    }

    #[rstest]
    fn test_same_instant_in_different_offsets_is_equal() {
        let utc = DateTimeValue::new("2024-03-15T10:00:00Z");
        let local = DateTimeValue::new("2024-03-15T12:00:00+02:00");
        assert_eq!(utc, local);
        assert!(utc.compare(CompareOp::Eq, &local).unwrap());
        assert!(utc.compare(CompareOp::Lt, "2024-03-15T10:00:01Z").unwrap());
    }

    #[rstest]
    fn test_arithmetic() {
        let start = DateTimeValue::new("2024-03-15T23:30:00+02:00");
        let later = start.add(TimeDelta::minutes(45)).unwrap();
        assert_eq!(later.to_string(), "2024-03-16T00:15:00+02:00");
        assert_eq!(later.raw().minute(), 15);

        let earlier = start.sub(NumberValue::new(dec!(1.5), 1, Some(UnitAny::from(&time().hour)))).unwrap();
        assert_eq!(earlier.to_string(), "2024-03-15T22:00:00+02:00");

        assert_eq!(later.since(&start).unwrap(), TimeDelta::minutes(45));
        assert!(matches!(
            start.add("1h"),
            Err(ModelError::UnsupportedOperation { .. })
        ));
    }

    #[rstest]
    fn test_epoch_conversions() {
        let value = DateTimeValue::new("1970-01-02T00:00:00.250Z");
        assert_eq!(value.to_i64(), 86_400);
        assert!((value.to_f64() - 86_400.25).abs() < 1e-9);
    }
}
