//! Business logic services for the Agri Advisory Platform

pub mod advisory;
pub mod audio;
pub mod price;
pub mod sourced;
pub mod users;
pub mod voice;
pub mod weather;

pub use advisory::AdvisoryEngine;
pub use audio::{AudioStore, FileAudioStore};
pub use price::PriceAggregator;
pub use sourced::Sourced;
pub use users::UserService;
pub use voice::{VoicePathway, VoiceReply, VoiceUpload};
pub use weather::WeatherAggregator;
