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

//! Currency units (base and storage: US Dollar).
//!
//! Currency factors are exchange rates into US Dollars. They may come from a pluggable
//! [`CurrencyRateProvider`]; every currency whose lookup fails, or yields a non-positive rate,
//! falls back to its static default.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    enums::UnitFamily,
    units::{CatalogEntry, DimensionCatalog, Unit},
};

static CURRENCY: OnceLock<CurrencyUnits> = OnceLock::new();

/// The code of the base currency, whose factor is always 1.
pub const BASE_CURRENCY: &str = "USD";

/// Static rates into US Dollars as `(code, name, rate)`.
pub const DEFAULT_RATES: [(&str, &str, Decimal); 10] = [
    ("USD", "US Dollar", dec!(1)),
    ("EUR", "Euro", dec!(1.21)),
    ("GBP", "British Pound", dec!(1.39)),
    ("JPY", "Japanese Yen", dec!(0.0095)),
    ("CNY", "Chinese Yuan", dec!(0.15)),
    ("AUD", "Australian Dollar", dec!(0.77)),
    ("CAD", "Canadian Dollar", dec!(0.79)),
    ("CHF", "Swiss Franc", dec!(1.11)),
    ("SEK", "Swedish Krona", dec!(0.12)),
    ("NZD", "New Zealand Dollar", dec!(0.72)),
];

/// Supplies the value of one unit of a currency in US Dollars at a point in time.
pub trait CurrencyRateProvider: Send + Sync {
    /// Returns the rate of `code` into US Dollars at `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is unavailable.
    fn rate(&self, code: &str, at: DateTime<Utc>) -> anyhow::Result<Decimal>;
}

impl<F> CurrencyRateProvider for F
where
    F: Fn(&str, DateTime<Utc>) -> anyhow::Result<Decimal> + Send + Sync,
{
    fn rate(&self, code: &str, at: DateTime<Utc>) -> anyhow::Result<Decimal> {
        self(code, at)
    }
}

/// The currency catalog and its named units.
#[derive(Clone, Debug)]
pub struct CurrencyUnits {
    pub catalog: Arc<DimensionCatalog>,
    pub us_dollar: Unit,
    pub euro: Unit,
    pub british_pound: Unit,
    pub japanese_yen: Unit,
    pub chinese_yuan: Unit,
    pub australian_dollar: Unit,
    pub canadian_dollar: Unit,
    pub swiss_franc: Unit,
    pub swedish_krona: Unit,
    pub new_zealand_dollar: Unit,
}

impl CurrencyUnits {
    /// Builds the currency catalog from the static default rates.
    #[must_use]
    pub fn initialize() -> Self {
        Self::initialize_with(None, Utc::now())
    }

    /// Builds the currency catalog, consulting `provider` for the rates at `at`.
    #[must_use]
    pub fn initialize_with(provider: Option<&dyn CurrencyRateProvider>, at: DateTime<Utc>) -> Self {
        let entries = DEFAULT_RATES
            .iter()
            .map(|(code, name, default)| {
                let rate = match provider {
                    Some(provider) if *code != BASE_CURRENCY => {
                        resolve_rate(provider, code, *default, at)
                    }
                    _ => *default,
                };
                CatalogEntry::new(name, code, rate)
            })
            .collect();

        let catalog = DimensionCatalog::new(UnitFamily::Currency, "US Dollar", "US Dollar", entries);

        Self {
            us_dollar: Unit::new(&catalog, "USD"),
            euro: Unit::new(&catalog, "EUR"),
            british_pound: Unit::new(&catalog, "GBP"),
            japanese_yen: Unit::new(&catalog, "JPY"),
            chinese_yuan: Unit::new(&catalog, "CNY"),
            australian_dollar: Unit::new(&catalog, "AUD"),
            canadian_dollar: Unit::new(&catalog, "CAD"),
            swiss_franc: Unit::new(&catalog, "CHF"),
            swedish_krona: Unit::new(&catalog, "SEK"),
            new_zealand_dollar: Unit::new(&catalog, "NZD"),
            catalog,
        }
    }
}

fn resolve_rate(
    provider: &dyn CurrencyRateProvider,
    code: &str,
    default: Decimal,
    at: DateTime<Utc>,
) -> Decimal {
    match provider.rate(code, at) {
        Ok(rate) if rate > Decimal::ZERO => rate,
        Ok(rate) => {
            log::warn!("Invalid {code} rate {rate} at {at}, using default {default}");
            default
        }
        Err(e) => {
            log::warn!("Failed to fetch {code} rate at {at}, using default {default}: {e}");
            default
        }
    }
}

/// Returns the process-wide currency units (static default rates).
pub fn currency() -> &'static CurrencyUnits {
    CURRENCY.get_or_init(CurrencyUnits::initialize)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[rstest]
    fn test_defaults() {
        let currency = currency();
        assert_eq!(currency.catalog.len(), 10);
        assert_eq!(currency.us_dollar.factor(), dec!(1));
        assert_eq!(currency.euro.factor(), dec!(1.21));
        assert_eq!(currency.euro.name(), "Euro");
        assert_eq!(currency.catalog.base_unit(), currency.us_dollar);
    }

    #[rstest]
    fn test_provider_rates() {
        let provider = |code: &str, _at: DateTime<Utc>| -> anyhow::Result<Decimal> {
            match code {
                "EUR" => Ok(dec!(1.10)),
                "GBP" => anyhow::bail!("service unavailable"),
                "JPY" => Ok(dec!(0)),
                _ => Ok(dec!(2)),
            }
        };

        let units = CurrencyUnits::initialize_with(Some(&provider), at());
        assert_eq!(units.us_dollar.factor(), dec!(1));
        assert_eq!(units.euro.factor(), dec!(1.10));
        assert_eq!(units.british_pound.factor(), dec!(1.39));
        assert_eq!(units.japanese_yen.factor(), dec!(0.0095));
        assert_eq!(units.swiss_franc.factor(), dec!(2));
    }

    #[rstest]
    fn test_provider_receives_timestamp() {
        let expected = at();
        let provider = move |_code: &str, at: DateTime<Utc>| -> anyhow::Result<Decimal> {
            anyhow::ensure!(at == expected, "unexpected timestamp {at}");
            Ok(dec!(3))
        };

        let units = CurrencyUnits::initialize_with(Some(&provider), expected);
        assert_eq!(units.euro.factor(), dec!(3));
    }

    #[rstest]
    fn test_cross_rate() {
        let currency = currency();
        let (factor, unit) = currency.euro.convert(&currency.us_dollar).unwrap();
        assert_eq!(factor, dec!(1.21));
        assert_eq!(unit.symbol(), "USD");
    }
}
