//! Futurama API module
//!
//! Client for the public futuramaapi.com REST service. Only the character
//! listing endpoint is used.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{parse_character_page, CharacterSource, FuturamaClient};
pub use errors::ApiError;
pub use types::*;
