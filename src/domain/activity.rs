use super::enums::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A logged activity. Only read by statistics; the date is kept as the raw
/// text it was stored with and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub tag: Category,
}

impl Activity {
    /// A completed activity on the given day
    pub fn completed_on(date: NaiveDate, tag: Category) -> Self {
        Self {
            completed: true,
            date: Some(date.format("%Y-%m-%d").to_string()),
            tag,
        }
    }
}
