//! Validation utilities for Agri Advisory Platform inputs

use rust_decimal::Decimal;

use crate::models::{CropFeatures, SoilReading};

// ============================================================================
// Agronomic Validations
// ============================================================================

/// Validate pH is on the 0-14 scale
pub fn validate_ph(ph: Decimal) -> Result<(), &'static str> {
    if ph < Decimal::ZERO || ph > Decimal::from(14) {
        return Err("pH must be between 0 and 14");
    }
    Ok(())
}

/// Validate soil nutrient readings
pub fn validate_soil_reading(soil: &SoilReading) -> Result<(), &'static str> {
    if soil.nitrogen < Decimal::ZERO
        || soil.phosphorus < Decimal::ZERO
        || soil.potassium < Decimal::ZERO
    {
        return Err("Nutrient readings cannot be negative");
    }
    validate_ph(soil.ph)
}

/// Validate crop recommendation features
pub fn validate_crop_features(features: &CropFeatures) -> Result<(), &'static str> {
    validate_soil_reading(&SoilReading::new(
        features.nitrogen,
        features.phosphorus,
        features.potassium,
        features.ph,
    ))?;
    if features.humidity < Decimal::ZERO || features.humidity > Decimal::from(100) {
        return Err("Humidity must be between 0 and 100%");
    }
    if features.rainfall < Decimal::ZERO {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a chatbot query is not blank
pub fn validate_query(query: &str) -> Result<(), &'static str> {
    if query.trim().is_empty() {
        return Err("Query cannot be empty");
    }
    Ok(())
}

/// Validate username format (3-32 characters, letters, digits or underscore)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username may only contain letters, digits and underscores");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}
