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

//! Declarations of the record fields that produce values.

use std::sync::Arc;

use databucket_core::correctness::check_in_range_inclusive_u8;
use derive_builder::Builder;
use ustr::Ustr;

use crate::{
    enums::ValueKind,
    error::{ModelError, ModelResult},
    types::{DEFAULT_DECIMAL_PLACES, FIXED_PRECISION},
    units::UnitAny,
    values::{BooleanValue, DateTimeValue, DateValue, NumberValue, Operand, StringValue, Value},
};

/// Describes a record field and the values it produces.
///
/// Values made by [`FieldInfo::make_value`] keep a non-owning link back to the field, so a
/// field must be held in an [`Arc`] for the link to resolve.
#[derive(Clone, Debug, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct FieldInfo {
    /// The name of the field.
    #[builder(setter(into))]
    field_name: Ustr,
    /// The kind of value the field produces.
    kind: ValueKind,
    /// The precision of numeric values.
    #[builder(default = "DEFAULT_DECIMAL_PLACES")]
    decimal_places: u8,
    /// The maximum length in characters of text values.
    #[builder(default, setter(strip_option))]
    max_length: Option<usize>,
    /// The unit of numeric values.
    #[builder(default, setter(into, strip_option))]
    unit: Option<UnitAny>,
    #[builder(default)]
    is_required: bool,
    #[builder(default = "true")]
    is_changeable: bool,
    #[builder(default)]
    is_unique: bool,
    /// The text of the default value.
    #[builder(default, setter(into, strip_option))]
    default_text: Option<String>,
}

impl FieldInfoBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.field_name
            && name.as_str().trim().is_empty()
        {
            return Err("`field_name` must not be empty".to_string());
        }
        if let Some(decimal_places) = self.decimal_places {
            check_in_range_inclusive_u8(decimal_places, 0, FIXED_PRECISION, "decimal_places")
                .map_err(|e| e.to_string())?;
        }
        if let (Some(Some(unit)), Some(kind)) = (&self.unit, self.kind)
            && kind != ValueKind::Number
        {
            return Err(format!("unit {unit} declared on a {kind} field"));
        }
        Ok(())
    }
}

impl FieldInfo {
    #[must_use]
    pub fn field_name(&self) -> &str {
        self.field_name.as_str()
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    #[must_use]
    pub fn unit(&self) -> Option<&UnitAny> {
        self.unit.as_ref()
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    #[must_use]
    pub fn is_changeable(&self) -> bool {
        self.is_changeable
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    #[must_use]
    pub fn default_text(&self) -> Option<&str> {
        self.default_text.as_deref()
    }

    /// Builds a value of this field's kind from `raw`, linked back to this field.
    ///
    /// Numbers take the field's precision and unit.
    ///
    /// # Errors
    ///
    /// Returns the error of the value constructor for this field's kind, or
    /// [`ModelError::InvalidValue`] if text exceeds the maximum length.
    pub fn make_value(self: &Arc<Self>, raw: impl Into<Operand>) -> ModelResult<Value> {
        let value = match self.kind {
            ValueKind::Number => Value::Number(
                NumberValue::new_checked(raw, self.decimal_places, self.unit.clone())?
                    .with_field(self),
            ),
            ValueKind::String => {
                let text = StringValue::new(raw);
                if let Some(max) = self.max_length
                    && text.len() > max
                {
                    return Err(ModelError::InvalidValue(format!(
                        "text of length {} exceeds maximum {max} of field '{}'",
                        text.len(),
                        self.field_name
                    )));
                }
                Value::String(text.with_field(self))
            }
            ValueKind::Boolean => Value::Boolean(BooleanValue::new_checked(raw)?.with_field(self)),
            ValueKind::Date => Value::Date(DateValue::new_checked(raw)?.with_field(self)),
            ValueKind::DateTime => {
                Value::DateTime(DateTimeValue::new_checked(raw)?.with_field(self))
            }
        };
        log::trace!("Field '{}' produced {value}", self.field_name);
        Ok(value)
    }

    /// Builds the default value of this field, if one is declared.
    ///
    /// # Errors
    ///
    /// As for [`FieldInfo::make_value`].
    pub fn default_value(self: &Arc<Self>) -> ModelResult<Option<Value>> {
        self.default_text
            .as_deref()
            .map(|text| self.make_value(text))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::units::{UnitAny, length};

    fn length_field() -> Arc<FieldInfo> {
        Arc::new(
            FieldInfoBuilder::default()
                .field_name("length")
                .kind(ValueKind::Number)
                .decimal_places(2)
                .unit(UnitAny::from(&length().meter))
                .default_text("1.5")
                .build()
                .unwrap(),
        )
    }

    #[rstest]
    fn test_builder_defaults() {
        let field = FieldInfoBuilder::default()
            .field_name("comment")
            .kind(ValueKind::String)
            .build()
            .unwrap();
        assert_eq!(field.field_name(), "comment");
        assert_eq!(field.decimal_places(), DEFAULT_DECIMAL_PLACES);
        assert_eq!(field.max_length(), None);
        assert!(field.unit().is_none());
        assert!(!field.is_required());
        assert!(field.is_changeable());
        assert!(!field.is_unique());
        assert!(field.default_text().is_none());
    }

    #[rstest]
    fn test_builder_validation() {
        assert!(
            FieldInfoBuilder::default()
                .field_name("  ")
                .kind(ValueKind::String)
                .build()
                .is_err()
        );
        assert!(
            FieldInfoBuilder::default()
                .field_name("ratio")
                .kind(ValueKind::Number)
                .decimal_places(10)
                .build()
                .is_err()
        );
        assert!(
            FieldInfoBuilder::default()
                .field_name("label")
                .kind(ValueKind::String)
                .unit(UnitAny::from(&length().meter))
                .build()
                .is_err()
        );
        assert!(FieldInfoBuilder::default().field_name("kindless").build().is_err());
    }

    #[rstest]
    fn test_make_number_value_uses_precision_and_unit() {
        let field = length_field();
        let value = field.make_value(dec!(2.345)).unwrap();
        assert_eq!(value.to_string(), "2.34 m");

        let connected = value.connected_field().unwrap();
        assert!(Arc::ptr_eq(&connected, &field));
    }

    #[rstest]
    fn test_connected_field_does_not_keep_field_alive() {
        let field = length_field();
        let value = field.make_value(1).unwrap();
        drop(field);
        assert!(value.connected_field().is_none());
    }

    #[rstest]
    fn test_arithmetic_results_are_not_linked() {
        let field = length_field();
        let value = field.make_value(1).unwrap();
        let sum = value.apply(crate::enums::BinaryOp::Add, 1).unwrap();
        assert!(sum.connected_field().is_none());
    }

    #[rstest]
    fn test_default_value() {
        let field = length_field();
        assert_eq!(field.default_value().unwrap().unwrap().to_string(), "1.50 m");
    }

    #[rstest]
    fn test_make_value_per_kind() {
        let flag = Arc::new(
            FieldInfoBuilder::default()
                .field_name("active")
                .kind(ValueKind::Boolean)
                .build()
                .unwrap(),
        );
        assert_eq!(flag.make_value("yes").unwrap().kind(), ValueKind::Boolean);
        assert!(flag.make_value("perhaps").is_err());

        let day = Arc::new(
            FieldInfoBuilder::default()
                .field_name("day")
                .kind(ValueKind::Date)
                .build()
                .unwrap(),
        );
        assert_eq!(day.make_value("2024-05-01").unwrap().to_string(), "2024-05-01");
        assert!(matches!(
            day.make_value("tomorrow"),
            Err(ModelError::InvalidDate(_))
        ));
    }

    #[rstest]
    fn test_make_string_value_checks_max_length() {
        let code = Arc::new(
            FieldInfoBuilder::default()
                .field_name("code")
                .kind(ValueKind::String)
                .max_length(3usize)
                .build()
                .unwrap(),
        );
        assert_eq!(code.make_value("abc").unwrap().to_string(), "abc");
        assert!(matches!(
            code.make_value("abcd"),
            Err(ModelError::InvalidValue(_))
        ));
    }
}
