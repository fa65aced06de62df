use thiserror::Error;

/// Rejected task input. State is never mutated when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task name cannot be empty")]
    EmptyName,
}

/// Toggle on a position that does not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no task at index {index} (list has {len})")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Finish-day requested with no tasks for today
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("you have not added any tasks for today")]
pub struct EmptyDayError;
