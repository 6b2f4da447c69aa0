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
    hash::{Hash, Hasher},
    slice,
};

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::{
    enums::UnitFamily,
    units::{CombinedUnit, Unit},
};

/// Either an atomic [`Unit`] or a [`CombinedUnit`].
#[derive(Clone, Debug)]
pub enum UnitAny {
    Atomic(Unit),
    Combined(CombinedUnit),
}

impl UnitAny {
    /// Simplifies `combined` into the unit a value should carry.
    ///
    /// Returns `None` when both sides cancelled out and the atomic unit when a single numerator
    /// unit remains. The `total_factor` is dropped: callers apply it to the raw quantity first.
    #[must_use]
    pub fn simplify(combined: CombinedUnit) -> Option<Self> {
        if combined.is_none() {
            return None;
        }
        if combined.denominator().is_empty() && combined.numerator().len() == 1 {
            return Some(Self::Atomic(combined.numerator()[0].clone()));
        }
        Some(Self::Combined(combined.reset_total_factor()))
    }

    /// Returns this unit as a composite.
    #[must_use]
    pub fn to_combined(&self) -> CombinedUnit {
        match self {
            Self::Atomic(unit) => CombinedUnit::from_unit(unit.clone()),
            Self::Combined(combined) => combined.clone(),
        }
    }

    /// Returns every atomic unit involved, numerator first.
    pub fn parts(&self) -> Box<dyn Iterator<Item = &Unit> + '_> {
        match self {
            Self::Atomic(unit) => Box::new(slice::from_ref(unit).iter()),
            Self::Combined(combined) => Box::new(
                combined
                    .numerator()
                    .iter()
                    .chain(combined.denominator().iter()),
            ),
        }
    }

    /// Returns the factor carried by a composite (1 for atomic units).
    #[must_use]
    pub fn total_factor(&self) -> Decimal {
        match self {
            Self::Atomic(_) => Decimal::ONE,
            Self::Combined(combined) => combined.total_factor(),
        }
    }

    /// Returns the family of an atomic unit.
    #[must_use]
    pub fn family(&self) -> Option<UnitFamily> {
        match self {
            Self::Atomic(unit) => Some(unit.family()),
            Self::Combined(_) => None,
        }
    }

    #[must_use]
    pub fn as_atomic(&self) -> Option<&Unit> {
        match self {
            Self::Atomic(unit) => Some(unit),
            Self::Combined(_) => None,
        }
    }

    /// Returns the canonical string form (the symbol for atomic units).
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Atomic(unit) => unit.symbol().to_string(),
            Self::Combined(combined) => combined.canonical(),
        }
    }
}

impl PartialEq for UnitAny {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Atomic(left), Self::Atomic(right)) => left == right,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for UnitAny {}

impl Hash for UnitAny {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Display for UnitAny {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Atomic(unit) => write!(f, "{unit}"),
            Self::Combined(combined) => write!(f, "{combined}"),
        }
    }
}

impl Serialize for UnitAny {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl From<Unit> for UnitAny {
    fn from(unit: Unit) -> Self {
        Self::Atomic(unit)
    }
}

impl From<&Unit> for UnitAny {
    fn from(unit: &Unit) -> Self {
        Self::Atomic(unit.clone())
    }
}

impl From<CombinedUnit> for UnitAny {
    fn from(combined: CombinedUnit) -> Self {
        Self::Combined(combined)
    }
}

impl From<&CombinedUnit> for UnitAny {
    fn from(combined: &CombinedUnit) -> Self {
        Self::Combined(combined.clone())
    }
}

impl From<&UnitAny> for UnitAny {
    fn from(unit: &UnitAny) -> Self {
        unit.clone()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::units::{length, time};

    #[rstest]
    fn test_simplify() {
        let length = length();
        let time = time();

        let cancelled = &length.kilometer / &length.meter;
        assert_eq!(UnitAny::simplify(cancelled), None);

        let single = CombinedUnit::new(vec![length.meter.clone()], vec![], dec!(3));
        assert_eq!(
            UnitAny::simplify(single),
            Some(UnitAny::Atomic(length.meter.clone()))
        );

        let speed = CombinedUnit::new(vec![length.meter.clone()], vec![time.second.clone()], dec!(3));
        let simplified = UnitAny::simplify(speed).unwrap();
        assert_eq!(simplified.to_string(), "m/s");
        assert_eq!(simplified.total_factor(), dec!(1));
    }

    #[rstest]
    fn test_atomic_equals_singleton_composite() {
        let meter = UnitAny::from(&length().meter);
        let lifted = UnitAny::from(CombinedUnit::from_unit(length().meter.clone()));
        assert_eq!(meter, lifted);
        assert_eq!(meter.family(), Some(UnitFamily::Length));
        assert_eq!(lifted.family(), None);
    }

    #[rstest]
    fn test_parts() {
        let speed = UnitAny::from(&length().meter / &time().second);
        let symbols: Vec<&str> = speed.parts().map(Unit::symbol).collect();
        assert_eq!(symbols, vec!["m", "s"]);

        let meter = UnitAny::from(&length().meter);
        assert_eq!(meter.parts().count(), 1);
        assert_eq!(meter.as_atomic(), Some(&length().meter));
    }

    #[rstest]
    fn test_operators_accept_unit_any() {
        let per_second = UnitAny::from(CombinedUnit::unitless() / &time().second);
        let speed = &length().meter * &per_second;
        assert_eq!(speed.to_string(), "m/s");
    }
}
