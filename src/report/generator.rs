use crate::domain::{calendar_week_of, progress_percent, Activity, Task};
use crate::persistence::atomic_write;
use crate::report::stats::category_summary;
use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Plain text summary for the terminal
pub fn render_summary(tasks: &[Task], activities: &[Activity], streak: u32) -> String {
    let mut out = String::new();

    out.push_str(&format!("Streak: {} days\n", streak));
    for row in category_summary(tasks, activities) {
        out.push_str(&format!(
            "{}: {} tasks completed ({} days completed in this category)\n",
            row.category.name(),
            row.completed_tasks,
            row.completed_days
        ));
    }

    out
}

/// Markdown report for the given day
pub fn render_report(
    tasks: &[Task],
    activities: &[Activity],
    streak: u32,
    date: NaiveDate,
) -> String {
    let mut report = String::new();

    // Header
    report.push_str(&format!(
        "# Habit Report - {} (week {})\n\n",
        date,
        calendar_week_of(date)
    ));

    // Streak
    report.push_str("## Streak\n\n");
    report.push_str(&format!(
        "- **Consecutive Days:** {} ({}% of the bar)\n",
        streak,
        progress_percent(streak)
    ));
    let done = tasks.iter().filter(|t| t.completed).count();
    report.push_str(&format!("- **Today:** {}/{} tasks done\n\n", done, tasks.len()));

    // Categories
    report.push_str("## Categories\n\n");
    report.push_str("| Category | Tasks Completed | Days Completed |\n");
    report.push_str("|---|---|---|\n");
    for row in category_summary(tasks, activities) {
        report.push_str(&format!(
            "| {} | {} | {} |\n",
            row.category.name(),
            row.completed_tasks,
            row.completed_days
        ));
    }
    report.push('\n');

    // Task list
    if !tasks.is_empty() {
        report.push_str("## Tasks\n\n");
        for task in tasks {
            let mark = if task.completed { "x" } else { " " };
            report.push_str(&format!("- [{}] **{}** ({})\n", mark, task.name, task.tag));
        }
        report.push('\n');
    }

    report
}

/// Write the markdown report to `output`
pub fn generate_report(
    tasks: &[Task],
    activities: &[Activity],
    streak: u32,
    date: NaiveDate,
    output: &Path,
) -> Result<PathBuf> {
    let report = render_report(tasks, activities, streak, date);
    atomic_write(output, &report)?;
    Ok(output.to_path_buf())
}
