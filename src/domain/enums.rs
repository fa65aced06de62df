use serde::{Deserialize, Serialize};

/// Fixed classification for tasks and activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Study,
    Leisure,
    Work,
    #[default]
    Other,
}

impl Category {
    /// Parse a category from its lowercase tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "health" => Some(Self::Health),
            "study" => Some(Self::Study),
            "leisure" => Some(Self::Leisure),
            "work" => Some(Self::Work),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Tag as stored on disk
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Study => "study",
            Self::Leisure => "leisure",
            Self::Work => "work",
            Self::Other => "other",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Study => "Study",
            Self::Leisure => "Leisure",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::Health,
            Category::Study,
            Category::Leisure,
            Category::Work,
            Category::Other,
        ]
    }

    /// Next category in display order, wrapping around (used by the add form)
    pub fn next(&self) -> Self {
        match self {
            Self::Health => Self::Study,
            Self::Study => Self::Leisure,
            Self::Leisure => Self::Work,
            Self::Work => Self::Other,
            Self::Other => Self::Health,
        }
    }

    /// Previous category in display order, wrapping around
    pub fn prev(&self) -> Self {
        match self {
            Self::Health => Self::Other,
            Self::Study => Self::Health,
            Self::Leisure => Self::Study,
            Self::Work => Self::Leisure,
            Self::Other => Self::Work,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_tag())
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    Message, // Modal message after finish-day / save
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_tag() {
        assert_eq!(Category::from_tag("health"), Some(Category::Health));
        assert_eq!(Category::from_tag("STUDY"), Some(Category::Study));
        assert_eq!(Category::from_tag(" work "), Some(Category::Work));
        assert_eq!(Category::from_tag("gardening"), None);
    }

    #[test]
    fn test_category_tag_roundtrip() {
        for category in Category::all() {
            assert_eq!(Category::from_tag(category.to_tag()), Some(*category));
        }
    }

    #[test]
    fn test_category_cycle() {
        let mut category = Category::Health;
        for _ in 0..Category::all().len() {
            category = category.next();
        }
        assert_eq!(category, Category::Health);
        assert_eq!(Category::Health.prev(), Category::Other);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Leisure).unwrap();
        assert_eq!(json, "\"leisure\"");
        let parsed: Category = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }
}
