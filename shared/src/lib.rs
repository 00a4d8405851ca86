//! Shared types and decision logic for the Agri Advisory Platform
//!
//! This crate holds everything that is pure: the domain models, locale
//! resolution, the keyword intent classifier and the agronomic decision
//! rules. The backend layers I/O and fallback policy on top of it.

pub mod intent;
pub mod models;
pub mod rules;
pub mod types;
pub mod validation;

pub use intent::*;
pub use models::*;
pub use rules::*;
pub use types::*;
pub use validation::*;
