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

//! Fixed-precision decimal support for the value family.
//!
//! Numbers carried by [`NumberValue`](crate::values::NumberValue) are arbitrary-precision
//! decimals quantized to between 0 and [`FIXED_PRECISION`] decimal places. The helpers in
//! [`fixed`] perform the quantization, the precision checks and the parsing of raw inputs.

pub mod fixed;

// Re-exports
pub use fixed::{
    DEFAULT_DECIMAL_PLACES, FIXED_PRECISION, check_fixed_precision, max_precision, quantize,
};
