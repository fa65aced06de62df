use crate::domain::{Activity, Category, Task};
use std::collections::{BTreeMap, BTreeSet};

/// Per-category counts for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    /// Completed tasks in this category
    pub completed_tasks: usize,
    /// Distinct days with at least one completion in this category
    pub completed_days: usize,
}

/// Map with every category present and set to zero
fn zeroed() -> BTreeMap<Category, usize> {
    Category::all().iter().map(|c| (*c, 0)).collect()
}

/// Count distinct completion dates per category across tasks and activities.
///
/// Tasks contribute their completion date, activities their raw date. Records
/// that are not completed or carry no date are skipped. Dates are compared as
/// exact `YYYY-MM-DD` strings.
pub fn completed_days_by_category(
    tasks: &[Task],
    activities: &[Activity],
) -> BTreeMap<Category, usize> {
    let mut days: BTreeMap<Category, BTreeSet<String>> = BTreeMap::new();

    for task in tasks {
        if let (true, Some(date)) = (task.completed, task.completion_date) {
            days.entry(task.tag)
                .or_default()
                .insert(date.format("%Y-%m-%d").to_string());
        }
    }

    for activity in activities {
        if let (true, Some(date)) = (activity.completed, activity.date.as_ref()) {
            days.entry(activity.tag).or_default().insert(date.clone());
        }
    }

    let mut counts = zeroed();
    for (category, dates) in days {
        counts.insert(category, dates.len());
    }
    counts
}

/// Number of completed tasks per category, regardless of date
pub fn completed_count_by_category(tasks: &[Task]) -> BTreeMap<Category, usize> {
    let mut counts = zeroed();
    for task in tasks.iter().filter(|t| t.completed) {
        *counts.entry(task.tag).or_insert(0) += 1;
    }
    counts
}

/// One row per category in display order
pub fn category_summary(tasks: &[Task], activities: &[Activity]) -> Vec<CategorySummary> {
    let counts = completed_count_by_category(tasks);
    let days = completed_days_by_category(tasks, activities);

    Category::all()
        .iter()
        .map(|category| CategorySummary {
            category: *category,
            completed_tasks: counts.get(category).copied().unwrap_or(0),
            completed_days: days.get(category).copied().unwrap_or(0),
        })
        .collect()
}
