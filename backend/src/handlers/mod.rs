//! HTTP request handlers

pub mod audio;
pub mod chatbot;
pub mod crop;
pub mod health;
pub mod price;
pub mod users;
pub mod voice;
pub mod weather;

pub use audio::get_audio;
pub use chatbot::chatbot;
pub use crop::recommend_crop;
pub use health::health_check;
pub use price::get_mandi_price;
pub use users::{get_user, login, set_language, signup};
pub use voice::voice_query;
pub use weather::get_weather;
