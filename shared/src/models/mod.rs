//! Domain models for the Agri Advisory Platform

mod advisory;
mod crop;
mod price;
mod user;
mod weather;

pub use advisory::*;
pub use crop::*;
pub use price::*;
pub use user::*;
pub use weather::*;
