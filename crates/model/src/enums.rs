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

//! Enumerations for the unit algebra and value dispatch table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr, IntoEnumIterator};

/// A dimension family: a group of mutually convertible units.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitFamily {
    /// Length (base unit: meter).
    Length = 1,
    /// Weight (base unit: kilogram).
    Weight = 2,
    /// Time (base unit: second).
    Time = 3,
    /// Electric current (base unit: ampere).
    ElectricCurrent = 4,
    /// Currency (base unit: US Dollar).
    Currency = 5,
}

impl UnitFamily {
    /// Looks up a family by a loose name.
    ///
    /// Matching ignores ASCII case and underscores, and accepts a trailing `Unit` suffix, so
    /// `"length"`, `"ELECTRIC_CURRENT"`, `"ElectricCurrent"` and `"LengthUnit"` all resolve.
    #[must_use]
    pub fn from_loose_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('_', "");
        let normalized = normalized
            .strip_suffix("Unit")
            .or_else(|| normalized.strip_suffix("unit"))
            .unwrap_or(&normalized);
        Self::iter().find(|family| {
            family
                .as_ref()
                .replace('_', "")
                .eq_ignore_ascii_case(normalized)
        })
    }
}

/// The kind of a [`Value`](crate::values::Value).
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    Number = 1,
    String = 2,
    Boolean = 3,
    Date = 4,
    DateTime = 5,
}

/// A binary operator of the value dispatch table.
#[repr(C)]
#[derive(
    Copy, Clone, Debug, Display, Hash, PartialEq, Eq, AsRefStr, FromRepr, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BinaryOp {
    Add = 1,
    Sub = 2,
    Mul = 3,
    Div = 4,
    FloorDiv = 5,
    Mod = 6,
    Pow = 7,
    And = 8,
    Or = 9,
    Xor = 10,
}

/// A comparison operator of the value dispatch table.
#[repr(C)]
#[derive(
    Copy, Clone, Debug, Display, Hash, PartialEq, Eq, AsRefStr, FromRepr, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CompareOp {
    Eq = 1,
    Ne = 2,
    Lt = 3,
    Le = 4,
    Gt = 5,
    Ge = 6,
}

impl CompareOp {
    /// Returns whether `ordering` satisfies this operator.
    #[must_use]
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }
}

/// A unary operator of the value dispatch table.
#[repr(C)]
#[derive(
    Copy, Clone, Debug, Display, Hash, PartialEq, Eq, AsRefStr, FromRepr, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UnaryOp {
    Neg = 1,
    Pos = 2,
    Abs = 3,
    Invert = 4,
    Floor = 5,
    Ceil = 6,
    Not = 7,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("length", Some(UnitFamily::Length))]
    #[case("LengthUnit", Some(UnitFamily::Length))]
    #[case("ELECTRIC_CURRENT", Some(UnitFamily::ElectricCurrent))]
    #[case("ElectricCurrentUnit", Some(UnitFamily::ElectricCurrent))]
    #[case("currency", Some(UnitFamily::Currency))]
    #[case("volume", None)]
    fn test_unit_family_from_loose_name(
        #[case] name: &str,
        #[case] expected: Option<UnitFamily>,
    ) {
        assert_eq!(UnitFamily::from_loose_name(name), expected);
    }

    #[rstest]
    fn test_unit_family_display_and_parse() {
        assert_eq!(UnitFamily::ElectricCurrent.to_string(), "ELECTRIC_CURRENT");
        assert_eq!(
            UnitFamily::from_str("electric_current").unwrap(),
            UnitFamily::ElectricCurrent
        );
    }

    #[rstest]
    fn test_value_kind_display() {
        assert_eq!(ValueKind::DateTime.to_string(), "DATE_TIME");
        assert_eq!(ValueKind::from_repr(1), Some(ValueKind::Number));
    }

    #[rstest]
    #[case(CompareOp::Eq, Ordering::Equal, true)]
    #[case(CompareOp::Eq, Ordering::Less, false)]
    #[case(CompareOp::Ne, Ordering::Greater, true)]
    #[case(CompareOp::Lt, Ordering::Less, true)]
    #[case(CompareOp::Le, Ordering::Equal, true)]
    #[case(CompareOp::Le, Ordering::Greater, false)]
    #[case(CompareOp::Gt, Ordering::Greater, true)]
    #[case(CompareOp::Ge, Ordering::Less, false)]
    fn test_compare_op_matches(
        #[case] op: CompareOp,
        #[case] ordering: Ordering,
        #[case] expected: bool,
    ) {
        assert_eq!(op.matches(ordering), expected);
    }
}
