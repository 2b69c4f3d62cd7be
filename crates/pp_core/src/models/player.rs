use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable player identifier as issued by the datastore.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier for players created outside the datastore.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A rostered league member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dupr_id: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: display_name.into(), email: None, dupr_id: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Same person by trimmed, case-insensitive name or non-empty email.
    pub fn matches(&self, name: &str, email: Option<&str>) -> bool {
        let same_name = self.display_name.trim().to_lowercase() == name.trim().to_lowercase();
        let same_email = match (email.map(str::trim), self.email.as_deref()) {
            (Some(theirs), Some(ours)) if !theirs.is_empty() => {
                ours.trim().to_lowercase() == theirs.to_lowercase()
            }
            _ => false,
        };
        same_name || same_email
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
