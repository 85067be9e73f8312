//! View state for the character list

use crate::models::Character;
use crate::view::events::FetchEvent;

/// Message shown for every kind of fetch failure
pub const FETCH_ERROR_MESSAGE: &str = "Error al cargar los personajes. Intenta nuevamente.";

/// Lifecycle of the character list
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Loaded(Vec<Character>),
}

/// What the body of the screen shows, in priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Content<'a> {
    /// Nothing yet; the loading overlay covers the screen
    Blank,
    Error(&'a str),
    Empty,
    List(&'a [Character]),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Loaded characters; empty while loading or after a failure
    pub fn characters(&self) -> &[Character] {
        match self {
            ViewState::Loaded(characters) => characters,
            _ => &[],
        }
    }

    pub fn content(&self) -> Content<'_> {
        match self {
            ViewState::Loading => Content::Blank,
            ViewState::Failed(message) => Content::Error(message),
            ViewState::Loaded(characters) if characters.is_empty() => Content::Empty,
            ViewState::Loaded(characters) => Content::List(characters),
        }
    }

    /// State reached once a fetch settles. The failure cause is dropped.
    pub fn settle(event: FetchEvent) -> Self {
        match event {
            FetchEvent::CharactersLoaded(characters) => ViewState::Loaded(characters),
            FetchEvent::CharactersFailed(_) => ViewState::Failed(FETCH_ERROR_MESSAGE.to_string()),
        }
    }
}
