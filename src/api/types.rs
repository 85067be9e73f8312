//! Response envelopes and endpoint constants for the Futurama API

use serde::Deserialize;

use crate::models::Character;

/// One page of the character listing
#[derive(Debug, Default, Deserialize)]
pub struct CharacterPage {
    /// Characters on this page; absent and `null` both mean none
    #[serde(default)]
    pub items: Option<Vec<Character>>,
    /// Total number of characters across all pages
    pub total: Option<u64>,
    /// Page number echoed by the server
    pub page: Option<u64>,
    /// Page size echoed by the server
    pub size: Option<u64>,
    /// Number of pages available
    pub pages: Option<u64>,
}

impl CharacterPage {
    pub fn into_items(self) -> Vec<Character> {
        self.items.unwrap_or_default()
    }
}

/// Futurama API endpoints and constants
pub struct FuturamaApi;

impl FuturamaApi {
    /// Base URL for the Futurama API
    pub const BASE_URL: &'static str = "https://futuramaapi.com";
    /// Character listing endpoint
    pub const CHARACTERS_ENDPOINT: &'static str = "/api/characters";
    /// Query used for every listing request: first 50 characters by ascending id
    pub const CHARACTERS_QUERY: [(&'static str, &'static str); 4] = [
        ("orderBy", "id"),
        ("orderByDirection", "asc"),
        ("page", "1"),
        ("size", "50"),
    ];
}
