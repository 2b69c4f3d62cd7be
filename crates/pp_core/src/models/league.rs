use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Seed used when a league carries no seed, id or slug at all.
pub const FALLBACK_SEED: &str = "seed";

/// One division running a six-week schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Court numbers the organizer has switched on; empty means "size to the roster".
    #[serde(default)]
    pub courts_enabled: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<String>,
}

impl League {
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            division: None,
            start_date: None,
            courts_enabled: Vec::new(),
            random_seed: None,
        }
    }

    /// Display label: the division name, else the slug.
    pub fn label(&self) -> &str {
        match self.division.as_deref() {
            Some(division) if !division.is_empty() => division,
            _ => &self.slug,
        }
    }

    /// Week-1 shuffle seed: stored seed, then id, then slug, then [`FALLBACK_SEED`].
    pub fn shuffle_seed(&self) -> &str {
        [self.random_seed.as_deref(), Some(self.id.as_str()), Some(self.slug.as_str())]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(FALLBACK_SEED)
    }

    /// Engine parameters derived from this league's stored settings.
    pub fn court_config(&self) -> CourtConfig {
        CourtConfig {
            enabled_courts: self.courts_enabled.clone(),
            seed: self.shuffle_seed().to_string(),
        }
    }

    /// Replace the stored seed so week-1 groupings change for everyone.
    pub fn reroll_seed(&mut self, now_millis: i64) -> &str {
        let seed = format!("seed-{}-{}", self.id, now_millis);
        tracing::info!(league = %self.id, %seed, "week 1 seed rerolled");
        self.random_seed.insert(seed).as_str()
    }

    /// Store the enabled courts sorted and without repeats.
    pub fn set_courts(&mut self, courts: impl IntoIterator<Item = u32>) {
        let mut courts: Vec<u32> = courts.into_iter().collect();
        courts.sort_unstable();
        courts.dedup();
        self.courts_enabled = courts;
    }
}

/// Per-league configuration handed to the assignment engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtConfig {
    #[serde(default)]
    pub enabled_courts: Vec<u32>,
    #[serde(default)]
    pub seed: String,
}
