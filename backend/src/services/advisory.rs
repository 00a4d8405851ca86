//! Advisory orchestration
//!
//! Classifies a query, gathers the weather or price data it needs, applies
//! the decision rules and renders a localized reply, which is then
//! synthesized to speech when possible.

use shared::{
    classify, irrigation_advice, nutrient_advice, recommend, AdvisoryContext, AdvisoryReply, Crop,
    CropFeatures, Intent, Locale, PriceQuote, WeatherReport,
};
use std::sync::Arc;

use super::audio::AudioStore;
use super::price::PriceAggregator;
use super::weather::WeatherAggregator;
use crate::external::{ProviderError, TextToSpeech};

/// Reply for queries no keyword set matches
pub const UNKNOWN_REPLY: &str =
    "I’m still learning. Ask about irrigation, soil, weather, or mandi prices.";

/// Stateless advisory engine, built once at startup and shared
#[derive(Clone)]
pub struct AdvisoryEngine {
    weather: WeatherAggregator,
    price: PriceAggregator,
    tts: Arc<dyn TextToSpeech>,
    audio: Arc<dyn AudioStore>,
}

impl AdvisoryEngine {
    pub fn new(
        weather: WeatherAggregator,
        price: PriceAggregator,
        tts: Arc<dyn TextToSpeech>,
        audio: Arc<dyn AudioStore>,
    ) -> Self {
        Self {
            weather,
            price,
            tts,
            audio,
        }
    }

    /// Answer a query and attach synthesized speech when available
    pub async fn compose(&self, ctx: &AdvisoryContext) -> AdvisoryReply {
        let text = self.compose_text(ctx).await;
        let audio_handle = self.synthesize_reply(&text, ctx.locale).await;
        AdvisoryReply { text, audio_handle }
    }

    /// Answer a query as text only
    pub async fn compose_text(&self, ctx: &AdvisoryContext) -> String {
        let intent = classify(&ctx.query);
        tracing::debug!(?intent, district = %ctx.district, crop = %ctx.crop, "dispatching query");

        match intent {
            Intent::Irrigation => {
                let report = self.weather.get_weather(&ctx.district).await;
                irrigation_advice(&ctx.crop, &report.forecast, ctx.locale)
            }
            Intent::Price => {
                let quote = self
                    .price
                    .get_price(&ctx.crop, self.price.default_state())
                    .await;
                format!("Current mandi price for {}: ₹{}", ctx.crop, quote.amount)
            }
            Intent::Weather => {
                let latest = self.weather.get_weather(&ctx.district).await.latest;
                format!(
                    "{}°C, {}% humidity, {} mm rain",
                    latest.temperature, latest.humidity, latest.rainfall
                )
            }
            Intent::Soil => nutrient_advice(&ctx.soil, ctx.locale),
            Intent::Unknown => UNKNOWN_REPLY.to_string(),
        }
    }

    /// Synthesize and store a reply. Failures are logged and yield no handle.
    pub async fn synthesize_reply(&self, text: &str, locale: Locale) -> Option<String> {
        match self.try_synthesize(text, locale).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, %locale, "speech synthesis failed, replying without audio");
                None
            }
        }
    }

    async fn try_synthesize(&self, text: &str, locale: Locale) -> Result<String, ProviderError> {
        let audio = self.tts.synthesize(text, locale).await?;
        self.audio.store(audio).await
    }

    pub async fn get_weather(&self, district: &str) -> WeatherReport {
        self.weather.get_weather(district).await
    }

    /// Price for a crop, in `state` or the configured default state
    pub async fn get_price(&self, crop: &str, state: Option<&str>) -> PriceQuote {
        let state = state.unwrap_or_else(|| self.price.default_state());
        self.price.get_price(crop, state).await
    }

    pub fn recommend(&self, features: &CropFeatures) -> Crop {
        recommend(features)
    }
}
