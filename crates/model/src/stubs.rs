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

//! Test fixtures for values and units.

use rstest::fixture;
use rust_decimal_macros::dec;

use crate::{
    units::{UnitAny, length},
    values::NumberValue,
};

/// A length of 12.345678 m at six decimal places.
#[fixture]
pub fn meters() -> NumberValue {
    NumberValue::new(dec!(12.345678), 6, Some(UnitAny::from(&length().meter)))
}

/// The unitless number 2.00.
#[fixture]
pub fn unitless() -> NumberValue {
    NumberValue::new(dec!(2), 2, None)
}
