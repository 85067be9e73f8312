//! Display rows derived from characters

use unicode_width::UnicodeWidthStr;

use crate::models::{Character, StatusCategory};
use crate::view::state::{Content, ViewState};
use crate::view::ui::{EMPTY_MESSAGE, LOADING_MESSAGE, TITLE};

/// Width of the avatar column, in terminal cells
pub const AVATAR_WIDTH: usize = 6;

/// What the avatar slot shows
#[derive(Debug, Clone, PartialEq)]
pub enum Avatar {
    Image(String),
    Initials(String),
}

impl Avatar {
    pub fn for_character(character: &Character) -> Self {
        match character.image_url() {
            Some(url) => Avatar::Image(url.to_string()),
            None => Avatar::Initials(character.initials()),
        }
    }

    /// Short label drawn in the avatar column
    pub fn label(&self) -> String {
        match self {
            Avatar::Image(_) => "[img]".to_string(),
            Avatar::Initials(initials) => format!("({})", initials),
        }
    }

    /// Label padded to the avatar column width
    pub fn cell(&self) -> String {
        pad_to_width(&self.label(), AVATAR_WIDTH)
    }
}

/// Everything one list row displays
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRow {
    pub key: i64,
    pub avatar: Avatar,
    pub heading: String,
    pub gender: String,
    pub status: String,
    pub status_category: StatusCategory,
}

impl CharacterRow {
    pub fn from_character(character: &Character) -> Self {
        Self {
            key: character.id,
            avatar: Avatar::for_character(character),
            heading: character.name.clone(),
            gender: character.gender_text(),
            status: character.status_text(),
            status_category: character.status_category(),
        }
    }

    pub fn gender_line(&self) -> String {
        format!("Género: {}", self.gender)
    }

    pub fn status_line(&self) -> String {
        format!("Estado: {}", self.status)
    }

    /// Single-line rendering used by the non-interactive print mode
    pub fn plain_line(&self) -> String {
        let avatar = match &self.avatar {
            Avatar::Image(url) => url.clone(),
            Avatar::Initials(_) => self.avatar.label(),
        };
        format!(
            "{:>4}  {}  {} | {} | {}",
            self.key,
            pad_to_width(&self.heading, 32),
            self.gender_line(),
            self.status_line(),
            avatar
        )
    }
}

pub fn rows_for(characters: &[Character]) -> Vec<CharacterRow> {
    characters.iter().map(CharacterRow::from_character).collect()
}

/// Plain-text report of the whole screen, for print mode
pub fn plain_report(state: &ViewState) -> String {
    let mut lines = vec![TITLE.to_string(), "=".repeat(TITLE.len())];
    match state.content() {
        Content::Blank => lines.push(LOADING_MESSAGE.to_string()),
        Content::Error(message) => lines.push(message.to_string()),
        Content::Empty => lines.push(EMPTY_MESSAGE.to_string()),
        Content::List(characters) => {
            lines.extend(rows_for(characters).iter().map(CharacterRow::plain_line));
            lines.push(String::new());
            lines.push(format!("Total: {} personajes", characters.len()));
        }
    }
    lines.join("\n")
}

/// Pad with spaces up to `width` terminal cells; longer text is left as is
fn pad_to_width(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}
