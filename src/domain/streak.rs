use super::errors::EmptyDayError;
use super::task::Task;
use anyhow::Result;
use tracing::{info, warn};

/// Every this many consecutive days counts as a milestone
pub const MILESTONE_EVERY: u32 = 5;

/// Destination for the streak value after each finished day. A sink that
/// also stores the task list should record the emptied list with it.
pub trait StreakSink {
    fn persist_streak(&mut self, streak: u32) -> Result<()>;
}

/// Result of finishing a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOutcome {
    /// Streak after the update
    pub streak: u32,
    /// Whether every task was done
    pub all_completed: bool,
    /// New streak is a positive multiple of [`MILESTONE_EVERY`]
    pub milestone: bool,
    /// Whether the new value reached the sink
    pub persisted: bool,
    /// The task list must be emptied after this call (always true)
    pub clear_tasks: bool,
}

impl DayOutcome {
    /// User-facing message for this outcome
    pub fn message(&self) -> String {
        if !self.all_completed {
            return "Some tasks were left unfinished. Your streak has been reset.".to_string();
        }
        if self.milestone {
            format!(
                "Congratulations! {} consecutive days completed! Keep it up! 🎉",
                self.streak
            )
        } else {
            "Congratulations! You completed every task today!".to_string()
        }
    }
}

/// Owner of the consecutive-days counter. The only way to change the value
/// after construction is [`finish_day`](Self::finish_day).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakEngine {
    streak: u32,
}

impl StreakEngine {
    /// Resume from a persisted value
    pub fn new(streak: u32) -> Self {
        Self { streak }
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Evaluate the day's tasks, update and persist the streak.
    ///
    /// Empty days are rejected without touching the counter or the sink.
    /// A failing sink is logged and reported through `persisted`, never as an error.
    pub fn finish_day<S: StreakSink + ?Sized>(
        &mut self,
        tasks: &[Task],
        sink: &mut S,
    ) -> Result<DayOutcome, EmptyDayError> {
        if tasks.is_empty() {
            return Err(EmptyDayError);
        }

        let all_completed = tasks.iter().all(|t| t.completed);
        if all_completed {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }
        let milestone = is_milestone(self.streak);

        let persisted = match sink.persist_streak(self.streak) {
            Ok(()) => true,
            Err(e) => {
                warn!(streak = self.streak, error = %e, "failed to persist streak");
                false
            }
        };

        info!(
            streak = self.streak,
            all_completed,
            milestone,
            tasks = tasks.len(),
            "day finished"
        );

        Ok(DayOutcome {
            streak: self.streak,
            all_completed,
            milestone,
            persisted,
            clear_tasks: true,
        })
    }
}

/// Positive multiple of [`MILESTONE_EVERY`]
pub fn is_milestone(streak: u32) -> bool {
    streak > 0 && streak % MILESTONE_EVERY == 0
}

/// Fill level of the streak bar: two percent per day, capped at 100
pub fn progress_percent(streak: u32) -> u16 {
    streak.saturating_mul(2).min(100) as u16
}
