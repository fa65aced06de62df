pub mod activity;
pub mod calendar;
pub mod enums;
pub mod errors;
pub mod streak;
pub mod task;

pub use activity::Activity;
pub use calendar::calendar_week_of;
pub use enums::{Category, UiMode};
pub use errors::{EmptyDayError, IndexError, ValidationError};
pub use streak::{progress_percent, DayOutcome, StreakEngine, StreakSink};
pub use task::{Task, TaskStore};
