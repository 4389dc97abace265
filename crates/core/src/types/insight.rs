//! Generated synopsis model

use serde::{Deserialize, Serialize};

/// Maximum number of themes and characters kept from a synopsis
pub const MAX_INSIGHT_ITEMS: usize = 3;

/// Structured synopsis produced by the insight service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiInsight {
    pub summary: String,
    pub themes: Vec<String>,
    pub characters: Vec<String>,
}

impl AiInsight {
    /// Trims whitespace, drops blank entries and caps both lists
    pub fn normalized(mut self) -> Self {
        self.summary = self.summary.trim().to_string();
        self.themes = cap(self.themes);
        self.characters = cap(self.characters);
        self
    }
}

fn cap(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_INSIGHT_ITEMS)
        .collect()
}
