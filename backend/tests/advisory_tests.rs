//! Advisory engine tests
//!
//! Intent dispatch, reply rendering, speech attachment and idempotence.

mod common;

use agri_advisory_backend::external::ProviderError;
use agri_advisory_backend::services::advisory::UNKNOWN_REPLY;
use agri_advisory_backend::services::AdvisoryEngine;
use chrono::Local;
use common::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;
use shared::{AdvisoryContext, Locale, SoilReading};
use std::sync::Arc;

fn context(query: &str, locale: Locale) -> AdvisoryContext {
    AdvisoryContext {
        query: query.to_string(),
        district: "Ludhiana".to_string(),
        crop: "Wheat".to_string(),
        soil: SoilReading::default(),
        locale,
    }
}

struct Harness {
    engine: AdvisoryEngine,
    weather: Arc<FakeWeather>,
    prices: Arc<FakePrices>,
    tts: Arc<FakeTts>,
    audio: Arc<MemoryAudioStore>,
}

fn harness(weather: FakeWeather, prices: FakePrices, tts: FakeTts) -> Harness {
    let weather = Arc::new(weather);
    let prices = Arc::new(prices);
    let tts = Arc::new(tts);
    let audio = Arc::new(MemoryAudioStore::default());
    Harness {
        engine: engine(weather.clone(), prices.clone(), tts.clone(), audio.clone()),
        weather,
        prices,
        tts,
        audio,
    }
}

/// Three recent days ending today with the given rainfall
fn rainy_days(rain: [f64; 3]) -> FakeWeather {
    let today = Local::now().date_naive();
    FakeWeather::returning(raw_series(
        today,
        &[(28.0, 60.0, rain[0]), (29.0, 62.0, rain[1]), (30.0, 65.0, rain[2])],
    ))
}

fn offline_weather() -> FakeWeather {
    FakeWeather::failing(ProviderError::Request("offline".to_string()))
}

fn price_of(amount: &str) -> FakePrices {
    FakePrices::returning(vec![modal_record(json!(amount))])
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_irrigation_query_delays_after_rain() {
        let h = harness(rainy_days([5.0, 8.0, 7.0]), price_of("2150"), FakeTts::working());
        let reply = h.engine.compose_text(&context("When should I irrigate?", Locale::English)).await;
        assert_eq!(reply, "Rain expected (~20.0 mm). Delay irrigation for Wheat.");
        assert_eq!(h.weather.calls(), 1);
    }

    #[tokio::test]
    async fn test_irrigation_query_in_punjabi_without_data() {
        let h = harness(offline_weather(), price_of("2150"), FakeTts::working());
        let reply = h.engine.compose_text(&context("ਸਿੰਚਾਈ ਬਾਰੇ ਦੱਸੋ", Locale::Punjabi)).await;
        assert_eq!(reply, "ਕੋਈ ਮੌਸਮ ਡਾਟਾ ਉਪਲਬਧ ਨਹੀਂ ਹੈ।");
    }

    #[tokio::test]
    async fn test_price_query_uses_default_state() {
        let h = harness(offline_weather(), price_of("2150"), FakeTts::working());
        let reply = h.engine.compose_text(&context("mandi rate today", Locale::English)).await;

        assert_eq!(reply, "Current mandi price for Wheat: ₹2150");
        assert_eq!(h.weather.calls(), 0);
        let requests = h.prices.requests.lock().unwrap();
        assert_eq!(requests[0].1, "Punjab");
    }

    #[tokio::test]
    async fn test_price_query_fallback_amount() {
        let h = harness(
            offline_weather(),
            FakePrices::failing(ProviderError::Status(500)),
            FakeTts::working(),
        );
        let reply = h.engine.compose_text(&context("wheat price?", Locale::English)).await;
        assert_eq!(reply, "Current mandi price for Wheat: ₹2000");
    }

    #[tokio::test]
    async fn test_weather_query_reads_latest() {
        let h = harness(rainy_days([0.0, 0.0, 2.5]), price_of("2150"), FakeTts::working());
        let reply = h.engine.compose_text(&context("What's the weather today?", Locale::English)).await;
        assert_eq!(reply, "30.0°C, 65.0% humidity, 2.5 mm rain");
    }

    #[tokio::test]
    async fn test_weather_query_placeholder_when_offline() {
        let h = harness(offline_weather(), price_of("2150"), FakeTts::working());
        let reply = h.engine.compose_text(&context("rain forecast", Locale::English)).await;
        assert_eq!(reply, "25°C, 70% humidity, 100 mm rain");
    }

    #[tokio::test]
    async fn test_soil_query_echoes_readings() {
        let h = harness(offline_weather(), price_of("2150"), FakeTts::working());
        let mut ctx = context("soil health", Locale::English);
        ctx.soil = SoilReading::new(
            Decimal::from(120),
            Decimal::new(425, 1),
            Decimal::from(30),
            Decimal::new(72, 1),
        );
        let reply = h.engine.compose_text(&ctx).await;
        assert_eq!(reply, "N=120, P=42.5, K=30, pH=7.2 → adjust fertilizers as needed.");
    }

    #[tokio::test]
    async fn test_unknown_query_is_locale_invariant() {
        let h = harness(offline_weather(), price_of("2150"), FakeTts::working());
        let en = h.engine.compose_text(&context("xyz random text", Locale::English)).await;
        let pa = h.engine.compose_text(&context("xyz random text", Locale::Punjabi)).await;
        assert_eq!(en, UNKNOWN_REPLY);
        assert_eq!(pa, UNKNOWN_REPLY);
        assert_eq!(h.weather.calls(), 0);
        assert!(h.prices.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_compose_attaches_audio_in_reply_locale() {
        let h = harness(offline_weather(), price_of("2150"), FakeTts::working());
        let reply = h.engine.compose(&context("ਮਿੱਟੀ", Locale::Punjabi)).await;

        let handle = reply.audio_handle.expect("audio handle");
        assert!(handle.starts_with("/api/v1/audio/"));
        assert_eq!(h.audio.files.lock().unwrap().len(), 1);

        let requests = h.tts.requests.lock().unwrap();
        assert_eq!(requests[0], (reply.text.clone(), Locale::Punjabi));
    }

    #[tokio::test]
    async fn test_synthesis_failure_yields_no_handle() {
        let h = harness(offline_weather(), price_of("2150"), FakeTts::broken());
        let reply = h.engine.compose(&context("mandi price", Locale::English)).await;

        assert_eq!(reply.text, "Current mandi price for Wheat: ₹2150");
        assert_eq!(reply.audio_handle, None);
        assert!(h.audio.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_compose_is_idempotent() {
        let h = harness(rainy_days([1.0, 2.0, 3.0]), price_of("2150"), FakeTts::working());
        for query in ["irrigate", "weather", "price", "soil", "hello"] {
            let ctx = context(query, Locale::English);
            let first = h.engine.compose_text(&ctx).await;
            let second = h.engine.compose_text(&ctx).await;
            assert_eq!(first, second, "query {:?}", query);
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn reading() -> impl Strategy<Value = Decimal> {
        (0i64..20_000, 0u32..3).prop_map(|(n, scale)| Decimal::new(n, scale))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Soil replies echo every supplied reading exactly
        #[test]
        fn prop_soil_reply_echoes_values(n in reading(), p in reading(), k in reading(), ph in 0i64..140) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let h = harness(offline_weather(), price_of("2150"), FakeTts::working());
            let mut ctx = context("which fertilizer", Locale::Punjabi);
            ctx.soil = SoilReading::new(n, p, k, Decimal::new(ph, 1));

            let reply = rt.block_on(h.engine.compose_text(&ctx));
            let expected = format!("N={}, P={}, K={}, pH={}", n, p, k, Decimal::new(ph, 1));
            prop_assert!(reply.starts_with(&expected));
        }
    }
}
