//! Events delivered from the background fetch to the view

use crate::api::ApiError;
use crate::models::Character;

/// Outcome of a fetch cycle
#[derive(Debug)]
pub enum FetchEvent {
    /// Characters arrived, in API order
    CharactersLoaded(Vec<Character>),
    /// The request failed for any reason
    CharactersFailed(ApiError),
}

impl From<Result<Vec<Character>, ApiError>> for FetchEvent {
    fn from(result: Result<Vec<Character>, ApiError>) -> Self {
        match result {
            Ok(characters) => FetchEvent::CharactersLoaded(characters),
            Err(e) => FetchEvent::CharactersFailed(e),
        }
    }
}
