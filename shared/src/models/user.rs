//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Locale;

/// A farmer account with a preferred reply language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub pref_lang: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn locale(&self) -> Locale {
        Locale::resolve(&self.pref_lang)
    }
}
