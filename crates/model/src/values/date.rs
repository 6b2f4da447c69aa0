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

use chrono::{NaiveDate, TimeDelta};
use databucket_core::{correctness::FAILED, datetime::parse_iso_date};

use crate::{
    enums::{BinaryOp, CompareOp, ValueKind},
    error::{ModelError, ModelResult},
    field::FieldInfo,
    values::{Operand, Value},
};

/// A calendar date.
#[derive(Clone, Debug)]
pub struct DateValue {
    raw: NaiveDate,
    field: Option<Weak<FieldInfo>>,
}

impl DateValue {
    /// Creates a new [`DateValue`] instance with correctness checking.
    ///
    /// Accepts ISO 8601 text (date or date-time), a date, or a date-time (its date part).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDate`] if `value` cannot be interpreted as a date.
    pub fn new_checked(value: impl Into<Operand>) -> ModelResult<Self> {
        Ok(Self {
            raw: date_from_operand(&value.into())?,
            field: None,
        })
    }

    /// Creates a new [`DateValue`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be interpreted as a date.
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
    pub fn raw(&self) -> NaiveDate {
        self.raw
    }

    /// Returns the field that produced this value, if it is still alive.
    #[must_use]
    pub fn connected_field(&self) -> Option<Arc<FieldInfo>> {
        self.field.as_ref().and_then(Weak::upgrade)
    }

    /// Returns the date `rhs` later, counting whole days only.
    ///
    /// `rhs` is a duration or a [`NumberValue`](crate::values::NumberValue) in a time unit.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedOperation`] if `rhs` is not a duration, or
    /// [`ModelError::InvalidDate`] if the result is out of range.
    pub fn add(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let delta = duration_from_operand(&rhs.into(), BinaryOp::Add, ValueKind::Date)?;
        self.shifted(self.raw.checked_add_signed(delta))
    }

    /// Returns the date `rhs` earlier, counting whole days only.
    ///
    /// # Errors
    ///
    /// As for [`DateValue::add`].
    pub fn sub(&self, rhs: impl Into<Operand>) -> ModelResult<Self> {
        let delta = duration_from_operand(&rhs.into(), BinaryOp::Sub, ValueKind::Date)?;
        self.shifted(self.raw.checked_sub_signed(delta))
    }

    fn shifted(&self, date: Option<NaiveDate>) -> ModelResult<Self> {
        date.map(|raw| Self { raw, field: None })
            .ok_or_else(|| ModelError::InvalidDate(format!("date arithmetic on {} out of range", self.raw)))
    }

    /// Returns the duration elapsed since `other` (negative if `other` is later).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDate`] if `other` cannot be interpreted as a date.
    pub fn since(&self, other: impl Into<Operand>) -> ModelResult<TimeDelta> {
        let other = date_from_operand(&other.into())?;
        Ok(self.raw.signed_duration_since(other))
    }

    /// Compares chronologically against `rhs` interpreted as a date.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDate`] if `rhs` cannot be interpreted as a date.
    pub fn compare(&self, op: CompareOp, rhs: impl Into<Operand>) -> ModelResult<bool> {
        let rhs = date_from_operand(&rhs.into())?;
        Ok(op.matches(self.raw.cmp(&rhs)))
    }
}

pub(crate) fn date_from_operand(operand: &Operand) -> ModelResult<NaiveDate> {
    match operand {
        Operand::Date(date) => Ok(*date),
        Operand::DateTime(dt) => Ok(dt.date_naive()),
        Operand::Text(text) => parse_date_text(text),
        Operand::Value(Value::Date(date)) => Ok(date.raw),
        Operand::Value(Value::DateTime(dt)) => Ok(dt.raw().date_naive()),
        Operand::Value(Value::String(text)) => parse_date_text(text.as_str()),
        other => Err(ModelError::InvalidDate(format!(
            "cannot interpret {} as a date",
            other.type_name()
        ))),
    }
}

fn parse_date_text(text: &str) -> ModelResult<NaiveDate> {
    parse_iso_date(text).map_err(|e| ModelError::InvalidDate(e.to_string()))
}

/// Interprets `rhs` as a duration for date arithmetic.
pub(crate) fn duration_from_operand(
    rhs: &Operand,
    op: BinaryOp,
    kind: ValueKind,
) -> ModelResult<TimeDelta> {
    match rhs {
        Operand::Duration(delta) => Ok(*delta),
        Operand::Value(Value::Number(number)) => number.to_duration(),
        other => Err(ModelError::unsupported(op, kind, other.type_name())),
    }
}

impl PartialEq for DateValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for DateValue {}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        units::{UnitAny, time},
        values::NumberValue,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Operand::from("2024-03-15"))]
    #[case(Operand::from("2024-03-15T23:59:59"))]
    #[case(Operand::from(date(2024, 3, 15)))]
    #[case(Operand::from(
        FixedOffset::east_opt(3_600).unwrap().with_ymd_and_hms(2024, 3, 15, 0, 30, 0).unwrap()
    ))]
    fn test_new_checked(#[case] value: Operand) {
        assert_eq!(DateValue::new_checked(value).unwrap().raw(), date(2024, 3, 15));
    }

    #[rstest]
    #[case(Operand::from("15/03/2024"))]
    #[case(Operand::from(20240315))]
    #[case(Operand::from(true))]
    fn test_new_checked_invalid(#[case] value: Operand) {
        assert!(matches!(
            DateValue::new_checked(value),
            Err(ModelError::InvalidDate(_))
        ));
    }

    #[rstest]
    fn test_add_and_sub_durations() {
        let start = DateValue::new("2024-02-28");
        assert_eq!(start.add(TimeDelta::days(2)).unwrap().to_string(), "2024-03-01");
        assert_eq!(start.sub(TimeDelta::days(28)).unwrap().to_string(), "2024-01-31");

        // Partial days are dropped
        assert_eq!(start.add(TimeDelta::hours(30)).unwrap().to_string(), "2024-02-29");

        let week = NumberValue::new(1, 0, Some(UnitAny::from(&time().week)));
        assert_eq!(start.add(&week).unwrap().to_string(), "2024-03-06");
    }

    #[rstest]
    fn test_add_rejects_non_durations() {
        let start = DateValue::new("2024-02-28");
        assert!(matches!(
            start.add(1),
            Err(ModelError::UnsupportedOperation { .. })
        ));
        let unitless = NumberValue::new(dec!(1), 0, None);
        assert!(matches!(
            start.add(&unitless),
            Err(ModelError::IncompatibleUnits { .. })
        ));
    }

    #[rstest]
    fn test_since() {
        let end = DateValue::new("2024-03-01");
        assert_eq!(end.since("2024-02-01").unwrap().num_days(), 29);
        assert_eq!(end.since(DateValue::new("2024-03-11")).unwrap().num_days(), -10);
    }

    #[rstest]
    fn test_compare() {
        let value = DateValue::new("2024-03-01");
        assert!(value.compare(CompareOp::Gt, "2024-02-29").unwrap());
        assert!(value.compare(CompareOp::Eq, date(2024, 3, 1)).unwrap());
        assert!(value < DateValue::new("2025-01-01"));
        assert!(value.compare(CompareOp::Lt, 5).is_err());
    }
}
