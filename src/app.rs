use crate::domain::{
    Activity, Category, DayOutcome, EmptyDayError, IndexError, StreakEngine, Task, TaskStore,
    UiMode, ValidationError,
};
use crate::persistence::{export_snapshot, KeyValueStore, Snapshot, Storage};
use crate::report::{category_summary, CategorySummary};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Modal message shown after finish-day, save, or a refused action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageState {
    pub title: String,
    pub lines: Vec<String>,
}

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub name: String,
    pub tag: Category,
    /// Set when the last submit was rejected
    pub error: Option<String>,
}

/// Main application state. Owns every piece of mutable data; handlers
/// receive it by `&mut`.
pub struct AppState {
    pub tasks: TaskStore,
    pub activities: Vec<Activity>,
    streak: StreakEngine,
    storage: Storage<Box<dyn KeyValueStore>>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub message: Option<MessageState>,
    pub status_line: Option<String>,
    pub needs_save: bool,
    /// Where `save_snapshot` writes when no path is given
    pub snapshot_path: Option<PathBuf>,
}

impl AppState {
    /// Load persisted state from the given store
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let mut storage = Storage::new(store);
        let tasks = storage.load_tasks();
        let activities = storage.load_activities();
        let streak = storage.load_streak();

        info!(
            tasks = tasks.len(),
            activities = activities.len(),
            streak,
            "state loaded"
        );

        Self {
            tasks: TaskStore::from_tasks(tasks),
            activities,
            streak: StreakEngine::new(streak),
            storage,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            message: None,
            status_line: None,
            needs_save: false,
            snapshot_path: None,
        }
    }

    /// Add a task at the end of today's list
    pub fn add_task(&mut self, name: &str, tag: Category) -> Result<Task, ValidationError> {
        let task = self.tasks.add(name, tag)?;
        info!(name = %task.name, tag = %task.tag, "task added");
        self.needs_save = true;
        Ok(task)
    }

    /// Flip completion of the task at `index` (0-based), dated today
    pub fn toggle_task(&mut self, index: usize) -> Result<Task, IndexError> {
        let task = self.tasks.toggle_completion(index)?;
        self.needs_save = true;
        Ok(task)
    }

    /// Flip completion with an explicit completion day
    pub fn toggle_task_on(&mut self, index: usize, today: NaiveDate) -> Result<Task, IndexError> {
        let task = self.tasks.toggle_completion_on(index, today)?;
        self.needs_save = true;
        Ok(task)
    }

    /// Evaluate the day, update the streak and clear the task list.
    ///
    /// The store receives the emptied list together with the new streak, so
    /// only the in-memory list is left to clear here.
    pub fn finish_day(&mut self) -> Result<DayOutcome, EmptyDayError> {
        let outcome = self.streak.finish_day(self.tasks.all(), &mut self.storage)?;

        if outcome.clear_tasks {
            self.tasks.clear();
            self.selected_index = 0;
            // Retry the cleared list on the next save if the store refused it
            self.needs_save = !outcome.persisted;
        }

        Ok(outcome)
    }

    /// Record a completed activity
    pub fn record_activity(&mut self, date: NaiveDate, tag: Category) -> Activity {
        let activity = Activity::completed_on(date, tag);
        self.activities.push(activity.clone());
        self.needs_save = true;
        activity
    }

    /// Current streak value
    pub fn streak(&self) -> u32 {
        self.streak.streak()
    }

    /// Per-category summary of current state
    pub fn category_summary(&self) -> Vec<CategorySummary> {
        category_summary(self.tasks.all(), &self.activities)
    }

    /// Persist tasks and activities. The streak is written by finish-day.
    pub fn save(&mut self) -> Result<()> {
        self.storage.save_tasks(self.tasks.all())?;
        self.storage.save_activities(&self.activities)?;
        self.needs_save = false;
        Ok(())
    }

    /// Save if anything changed. Failures are logged and shown; the in-memory
    /// state stays authoritative and the next change retries implicitly.
    pub fn autosave(&mut self) {
        if !self.needs_save {
            return;
        }
        match self.save() {
            Ok(()) => self.status_line = None,
            Err(e) => {
                warn!(error = %e, "failed to persist state");
                self.status_line = Some(format!("Could not save: {}", e));
            }
        }
    }

    /// Export the full state as pretty JSON
    pub fn save_snapshot(&self, output: Option<&Path>) -> Result<PathBuf> {
        let snapshot = Snapshot {
            tasks: self.tasks.all(),
            activities: &self.activities,
            streak: self.streak(),
        };
        let output = output.or(self.snapshot_path.as_deref());
        let path = export_snapshot(&snapshot, output)?;
        info!(path = %path.display(), "snapshot exported");
        Ok(path)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.tasks.len() {
            self.selected_index += 1;
        }
    }

    /// Toggle the selected task (no-op on an empty list)
    pub fn toggle_selected(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        if let Err(e) = self.toggle_task(self.selected_index) {
            warn!(error = %e, "toggle ignored");
        }
    }

    /// Finish the day and show the result as a message
    pub fn request_finish_day(&mut self) {
        match self.finish_day() {
            Ok(outcome) => {
                let mut lines = vec![outcome.message()];
                lines.push(format!("Streak: {} days", outcome.streak));
                if !outcome.persisted {
                    lines.push("Warning: the streak could not be saved to disk.".to_string());
                }
                self.show_message(" Day Finished ", lines);
            }
            Err(e) => self.show_message(" Nothing To Finish ", vec![capitalize(&e.to_string())]),
        }
    }

    /// Export a snapshot and show where it went
    pub fn request_save_snapshot(&mut self) {
        match self.save_snapshot(None) {
            Ok(path) => self.show_message(
                " Snapshot Saved ",
                vec![format!("Saved to {}", path.display())],
            ),
            Err(e) => {
                warn!(error = %e, "snapshot export failed");
                self.show_message(" Save Failed ", vec![format!("{:#}", e)]);
            }
        }
    }

    fn show_message(&mut self, title: &str, lines: Vec<String>) {
        self.message = Some(MessageState {
            title: title.to_string(),
            lines,
        });
        self.ui_mode = UiMode::Message;
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            name: String::new(),
            tag: Category::Health,
            error: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Add character to the name field
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.name.push(c);
            form.error = None;
        }
    }

    /// Backspace in the name field
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.name.pop();
        }
    }

    pub fn input_form_next_tag(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.tag = form.tag.next();
        }
    }

    pub fn input_form_prev_tag(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.tag = form.tag.prev();
        }
    }

    /// Submit input form. A rejected name keeps the form open with an error.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        match self.add_task(&form.name, form.tag) {
            Ok(_) => {
                self.selected_index = self.tasks.len() - 1;
                self.ui_mode = UiMode::Normal;
            }
            Err(e) => {
                self.input_form = Some(InputFormState {
                    error: Some(capitalize(&e.to_string())),
                    ..form
                });
            }
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::{backup_key, ACTIVITIES_KEY, STREAK_KEY, TASKS_KEY};
    use crate::persistence::{FileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn create_test_app() -> AppState {
        AppState::new(Box::new(MemoryStore::new()))
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert!(app.tasks.is_empty());
        assert_eq!(app.streak(), 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_add_task_marks_dirty() {
        let mut app = create_test_app();
        app.add_task("Run", Category::Health).unwrap();
        assert_eq!(app.tasks.len(), 1);
        assert!(app.needs_save);
    }

    #[test]
    fn test_add_blank_task_changes_nothing() {
        let mut app = create_test_app();
        assert_eq!(app.add_task("  ", Category::Work), Err(ValidationError::EmptyName));
        assert!(app.tasks.is_empty());
        assert!(!app.needs_save);
    }

    #[test]
    fn test_run_and_read_day() {
        let mut app = create_test_app();
        app.add_task("Run", Category::Health).unwrap();
        app.add_task("Read", Category::Study).unwrap();
        app.toggle_task_on(0, day("2024-01-10")).unwrap();
        app.toggle_task_on(1, day("2024-01-10")).unwrap();

        let days = app.category_summary();
        let by_category: BTreeMap<Category, usize> =
            days.iter().map(|row| (row.category, row.completed_days)).collect();
        assert_eq!(by_category[&Category::Health], 1);
        assert_eq!(by_category[&Category::Study], 1);
        assert_eq!(by_category[&Category::Leisure], 0);
        assert_eq!(by_category[&Category::Work], 0);
        assert_eq!(by_category[&Category::Other], 0);

        let outcome = app.finish_day().unwrap();
        assert_eq!(outcome.streak, 1);
        assert!(!outcome.milestone);
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_unfinished_day_resets_streak() {
        let mut store = MemoryStore::new();
        store.set("streak", "7").unwrap();
        let mut app = AppState::new(Box::new(store));
        assert_eq!(app.streak(), 7);

        app.add_task("Write report", Category::Work).unwrap();
        let outcome = app.finish_day().unwrap();

        assert_eq!(outcome.streak, 0);
        assert!(!outcome.all_completed);
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_finish_empty_day() {
        let mut store = MemoryStore::new();
        store.set("streak", "2").unwrap();
        let mut app = AppState::new(Box::new(store));

        assert_eq!(app.finish_day(), Err(EmptyDayError));
        assert_eq!(app.streak(), 2);
        assert!(!app.needs_save);
    }

    #[test]
    fn test_request_finish_day_shows_message() {
        let mut app = create_test_app();
        app.request_finish_day();
        assert_eq!(app.ui_mode, UiMode::Message);
        let message = app.message.clone().unwrap();
        assert_eq!(message.lines[0], "You have not added any tasks for today");

        app.dismiss_message();
        app.add_task("Run", Category::Health).unwrap();
        app.toggle_selected();
        app.request_finish_day();
        let message = app.message.clone().unwrap();
        assert!(message.lines[0].starts_with("Congratulations"));
        assert_eq!(message.lines[1], "Streak: 1 days");
    }

    #[test]
    fn test_streak_persists_across_sessions() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut app = AppState::new(Box::new(FileStore::new(temp_dir.path())));
        app.add_task("Run", Category::Health).unwrap();
        app.toggle_task(0).unwrap();
        app.finish_day().unwrap();
        app.add_task("Stretch", Category::Health).unwrap();
        app.save().unwrap();

        let reopened = AppState::new(Box::new(FileStore::new(temp_dir.path())));
        assert_eq!(reopened.streak(), 1);
        assert_eq!(reopened.tasks.len(), 1);
        assert_eq!(reopened.tasks.all()[0].name, "Stretch");
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();
        app.add_task("Task 1", Category::Work).unwrap();
        app.add_task("Task 2", Category::Work).unwrap();

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        // Can't go past the end
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        // Can't go below 0
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_toggle_selected_on_empty_list() {
        let mut app = create_test_app();
        app.toggle_selected();
        assert!(app.tasks.is_empty());
        assert!(!app.needs_save);
    }

    #[test]
    fn test_input_form_submit() {
        let mut app = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in "Read".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_tag();
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.tasks.all()[0].name, "Read");
        assert_eq!(app.tasks.all()[0].tag, Category::Study);
    }

    #[test]
    fn test_input_form_rejects_blank_name() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::AddingTask);
        let form = app.input_form.clone().unwrap();
        assert_eq!(form.error.as_deref(), Some("Task name cannot be empty"));
        assert!(app.tasks.is_empty());

        // Typing clears the error
        app.input_form_add_char('x');
        assert!(app.input_form.as_ref().unwrap().error.is_none());
    }

    #[test]
    fn test_cancel_input_form() {
        let mut app = create_test_app();
        app.start_add_task();
        app.cancel_input_form();
        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_record_activity_feeds_stats() {
        let mut app = create_test_app();
        app.record_activity(day("2024-01-08"), Category::Leisure);
        app.record_activity(day("2024-01-08"), Category::Leisure);
        app.record_activity(day("2024-01-09"), Category::Leisure);

        let leisure = app
            .category_summary()
            .into_iter()
            .find(|row| row.category == Category::Leisure)
            .unwrap();
        assert_eq!(leisure.completed_days, 2);
        assert_eq!(leisure.completed_tasks, 0);
    }

    #[test]
    fn test_save_snapshot_to_configured_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app();
        app.snapshot_path = Some(temp_dir.path().join("settings.json"));
        app.add_task("Run", Category::Health).unwrap();

        app.request_save_snapshot();
        assert_eq!(app.ui_mode, UiMode::Message);
        assert_eq!(app.message.as_ref().unwrap().title, " Snapshot Saved ");
        assert!(temp_dir.path().join("settings.json").exists());
    }

    #[test]
    fn test_autosave_failure_keeps_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("gone");
        let mut app = AppState::new(Box::new(FileStore::new(&missing)));

        app.add_task("Run", Category::Health).unwrap();
        app.autosave();

        assert!(app.needs_save);
        assert!(app.status_line.as_deref().unwrap().starts_with("Could not save"));
        assert_eq!(app.tasks.len(), 1);
    }

    #[test]
    fn test_finish_day_writes_cleared_list() {
        let mut app = create_test_app();
        app.add_task("Run", Category::Health).unwrap();
        app.toggle_task(0).unwrap();
        app.save().unwrap();

        let outcome = app.finish_day().unwrap();
        assert!(outcome.persisted);
        assert!(!app.needs_save);

        let store = app.storage.store();
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(STREAK_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_finish_day_cannot_be_counted_twice() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::new(Box::new(FileStore::new(temp_dir.path())));
        app.add_task("Run", Category::Health).unwrap();
        app.toggle_task(0).unwrap();
        app.save().unwrap();

        // A directory in place of the task file makes the cleared list unwritable
        std::fs::remove_file(temp_dir.path().join("tasks.json")).unwrap();
        std::fs::create_dir(temp_dir.path().join("tasks.json")).unwrap();

        let outcome = app.finish_day().unwrap();
        assert_eq!(outcome.streak, 1);
        assert!(!outcome.persisted);
        assert!(app.needs_save);
        assert!(app.tasks.is_empty());

        let reopened = AppState::new(Box::new(FileStore::new(temp_dir.path())));
        assert_eq!(reopened.streak(), 0);
    }

    #[test]
    fn test_bad_records_survive_a_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tasks = r#"[{"name":"Run","tag":"health","completed":false},{"name":"Yoga","tag":"saude","completed":false}]"#;
        let activities = r#"[{"completed":true,"date":"2024-01-09","tag":"health"},{"completed":true,"date":"2024-01-09","tag":"gym"}]"#;
        std::fs::write(temp_dir.path().join("tasks.json"), tasks).unwrap();
        std::fs::write(temp_dir.path().join("activities.json"), activities).unwrap();

        let mut app = AppState::new(Box::new(FileStore::new(temp_dir.path())));
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.activities.len(), 1);

        // Opening and leaving without changes writes nothing
        app.autosave();
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("tasks.json")).unwrap(),
            tasks
        );

        app.add_task("Read", Category::Study).unwrap();
        app.record_activity(day("2024-01-10"), Category::Study);
        app.save().unwrap();

        let reopened = AppState::new(Box::new(FileStore::new(temp_dir.path())));
        let names: Vec<&str> = reopened.tasks.all().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Run", "Read"]);
        assert_eq!(reopened.activities.len(), 2);

        let kept = |key: &str| {
            std::fs::read_to_string(temp_dir.path().join(format!("{}.json", backup_key(key))))
                .unwrap()
        };
        assert_eq!(kept(TASKS_KEY), tasks);
        assert_eq!(kept(ACTIVITIES_KEY), activities);
    }
}
