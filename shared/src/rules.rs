//! Agronomic decision rules
//!
//! Pure functions: crop selection from soil and climate features,
//! irrigation timing from the recent weather series, and nutrient guidance.

use rust_decimal::Decimal;

use crate::models::{Crop, CropFeatures, SoilReading, WeatherPoint};
use crate::types::Locale;

/// Rainfall over the recent window above which irrigation should wait
const DELAY_RAINFALL_MM: i64 = 15;

/// Number of trailing days considered for expected rainfall
const RAIN_WINDOW_DAYS: usize = 3;

/// Recommend a crop. Rules are evaluated in order and the first match wins:
///
/// 1. pH < 6.0 → Rice
/// 2. N > 100 and 6.0 ≤ pH ≤ 7.5 → Wheat
/// 3. rainfall > 120 → Maize
/// 4. temperature > 30 and K > 50 → Cotton
/// 5. otherwise → Pulses
pub fn recommend(features: &CropFeatures) -> Crop {
    let ph_low = Decimal::new(60, 1);
    let ph_high = Decimal::new(75, 1);

    if features.ph < ph_low {
        return Crop::Rice;
    }
    if features.nitrogen > Decimal::from(100) && features.ph >= ph_low && features.ph <= ph_high {
        return Crop::Wheat;
    }
    if features.rainfall > Decimal::from(120) {
        return Crop::Maize;
    }
    if features.temp > Decimal::from(30) && features.potassium > Decimal::from(50) {
        return Crop::Cotton;
    }
    Crop::Pulses
}

/// Total rainfall over the last three entries of a series (all entries if fewer)
pub fn recent_rainfall(forecast: &[WeatherPoint]) -> Decimal {
    let start = forecast.len().saturating_sub(RAIN_WINDOW_DAYS);
    forecast[start..].iter().map(|p| p.rainfall).sum()
}

/// Irrigation advice for a crop given the recent weather series
pub fn irrigation_advice(crop: &str, forecast: &[WeatherPoint], locale: Locale) -> String {
    let Some(latest) = forecast.last() else {
        return locale
            .pick("No forecast data available.", "ਕੋਈ ਮੌਸਮ ਡਾਟਾ ਉਪਲਬਧ ਨਹੀਂ ਹੈ।")
            .to_string();
    };

    let rain = recent_rainfall(forecast);
    if rain > Decimal::from(DELAY_RAINFALL_MM) {
        return match locale {
            Locale::English => format!("Rain expected (~{} mm). Delay irrigation for {}.", rain, crop),
            Locale::Punjabi => format!("ਅਗਲੇ ਦਿਨਾਂ ਵਿੱਚ ਮੀਂਹ (~{} mm)। {} ਦੀ ਸਿੰਚਾਈ ਰੋਕੋ।", rain, crop),
        };
    }

    if latest.temperature > Decimal::from(32) && latest.humidity < Decimal::from(50) {
        return match locale {
            Locale::English => format!("High temp & low humidity. Irrigate {} in 1–2 days.", crop),
            Locale::Punjabi => format!("ਤਾਪਮਾਨ ਜ਼ਿਆਦਾ ਤੇ ਨਮੀ ਘੱਟ। {} ਦੀ 1–2 ਦਿਨਾਂ ਵਿੱਚ ਸਿੰਚਾਈ ਕਰੋ।", crop),
        };
    }

    locale
        .pick(
            "Soil moisture OK. Irrigate every 7–10 days.",
            "ਮਿੱਟੀ ਦੀ ਨਮੀ ਠੀਕ ਹੈ। 7–10 ਦਿਨਾਂ 'ਚ ਸਿੰਚਾਈ ਕਰੋ।",
        )
        .to_string()
}

/// Nutrient guidance echoing the supplied readings
pub fn nutrient_advice(soil: &SoilReading, locale: Locale) -> String {
    let readings = format!(
        "N={}, P={}, K={}, pH={}",
        soil.nitrogen, soil.phosphorus, soil.potassium, soil.ph
    );
    match locale {
        Locale::English => format!("{} → adjust fertilizers as needed.", readings),
        Locale::Punjabi => format!("{} → ਲੋੜ ਅਨੁਸਾਰ ਖਾਦ ਵਰਤੋਂ।", readings),
    }
}
