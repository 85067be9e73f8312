//! futurama-roster: a terminal view of the Futurama character roster
//!
//! Fetches the first page of characters from futuramaapi.com once at startup
//! and shows each one with an avatar, name, gender and color-coded status.

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod tui;
pub mod view;
