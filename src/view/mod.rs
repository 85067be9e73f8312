//! Character list view
//!
//! The single screen of the application: fetches the roster once when mounted
//! and renders it as a list of character rows.

pub mod app;
pub mod events;
pub mod rows;
pub mod state;
pub mod ui;

pub use app::App;
pub use events::FetchEvent;
pub use rows::{Avatar, CharacterRow};
pub use state::{Content, ViewState, FETCH_ERROR_MESSAGE};
