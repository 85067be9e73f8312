use serde::Deserialize;
use serde_json::Value;

/// A Futurama character as returned by the character listing endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: String,
    /// MALE, FEMALE, OTHER or any other JSON value the API sends
    #[serde(default)]
    pub gender: Value,
    /// ALIVE, DEAD, UNKNOWN or any other JSON value the API sends
    #[serde(default)]
    pub status: Value,
    pub image: Option<String>,
    pub species: Option<String>,
    // Arrives as either a number or a string depending on the character
    pub age: Option<Value>,
    pub home_planet: Option<String>,
    pub occupation: Option<String>,
    pub sayings: Option<Vec<String>>,
}

impl Character {
    /// Image URL, only when it looks like a usable http(s) link
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| url.starts_with("http"))
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::from_value(&self.status)
    }

    pub fn gender_text(&self) -> String {
        display_value(&self.gender)
    }

    pub fn status_text(&self) -> String {
        display_value(&self.status)
    }
}

/// Text shown for a loosely typed field: strings verbatim, `null` as nothing,
/// anything else as its JSON text
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Up to two upper-cased initials taken from the space-separated words of `name`.
///
/// Empty segments produced by repeated spaces are skipped.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(2)
        .collect()
}

/// Semantic color bucket for a character status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Success,
    Danger,
    Medium,
}

impl StatusCategory {
    /// Classify a status string, ignoring case and surrounding whitespace
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_uppercase().as_str() {
            "ALIVE" => StatusCategory::Success,
            "DEAD" => StatusCategory::Danger,
            _ => StatusCategory::Medium,
        }
    }

    /// Classify a raw JSON status value; anything that is not a string is neutral
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(status) => Self::from_status(status),
            _ => StatusCategory::Medium,
        }
    }
}
