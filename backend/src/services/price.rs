//! Mandi price aggregation with a per-commodity fallback table

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{canonical_commodity, PriceQuote};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::sourced::Sourced;
use crate::external::{PriceProvider, PriceRecord, ProviderError};

/// Typical prices in rupees per quintal, used when live data is missing
const FALLBACK_PRICES: [(&str, i64); 5] = [
    ("Rice", 1900),
    ("Wheat", 2000),
    ("Maize", 1800),
    ("Cotton", 6200),
    ("Pulses", 6000),
];

const DEFAULT_FALLBACK_PRICE: i64 = 1500;

/// Fallback price for a canonical commodity name
pub fn fallback_amount(commodity: &str) -> i64 {
    FALLBACK_PRICES
        .iter()
        .find(|(name, _)| *name == commodity)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_FALLBACK_PRICE)
}

/// Parse one price field. Accepts numeric strings and JSON numbers; fractions are truncated.
fn price_field(value: Option<&serde_json::Value>) -> Option<i64> {
    let amount = match value? {
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            Decimal::from_str(s).ok()?
        }
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        _ => return None,
    };
    amount.trunc().to_i64()
}

/// Modal price, else minimum, else maximum
pub fn usable_record_price(record: &PriceRecord) -> Option<i64> {
    price_field(record.modal_price.as_ref())
        .or_else(|| price_field(record.min_price.as_ref()))
        .or_else(|| price_field(record.max_price.as_ref()))
}

/// Wraps a price provider with a time bound and the fallback table
#[derive(Clone)]
pub struct PriceAggregator {
    provider: Arc<dyn PriceProvider>,
    timeout: Duration,
    default_state: String,
}

impl PriceAggregator {
    pub fn new(provider: Arc<dyn PriceProvider>, timeout: Duration, default_state: String) -> Self {
        Self {
            provider,
            timeout,
            default_state,
        }
    }

    pub fn default_state(&self) -> &str {
        &self.default_state
    }

    pub async fn fetch_quote(&self, crop: &str, state: &str) -> Sourced<PriceQuote> {
        let commodity = canonical_commodity(crop);

        match self.fetch_live(&commodity, state).await {
            Ok(amount) => Sourced::Live(PriceQuote {
                commodity,
                amount,
                is_fallback: false,
            }),
            Err(reason) => {
                tracing::warn!(commodity = %commodity, state, %reason, "price unavailable, using fallback");
                Sourced::Fallback {
                    value: PriceQuote {
                        amount: fallback_amount(&commodity),
                        commodity,
                        is_fallback: true,
                    },
                    reason,
                }
            }
        }
    }

    pub async fn get_price(&self, crop: &str, state: &str) -> PriceQuote {
        self.fetch_quote(crop, state).await.into_value()
    }

    async fn fetch_live(&self, commodity: &str, state: &str) -> Result<i64, ProviderError> {
        let records = tokio::time::timeout(
            self.timeout,
            self.provider.fetch_price_raw(commodity, state),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.timeout.as_secs()))??;

        let first = records
            .first()
            .ok_or_else(|| ProviderError::Empty(format!("no records for {}", commodity)))?;
        usable_record_price(first)
            .ok_or_else(|| ProviderError::Empty("record has no usable price".to_string()))
    }
}
