//! Helpers shared by the mtsend crates.

pub mod error;

pub use error::FromMessage;
