use thiserror::Error;

/// Errors that can occur within the scheduler subsystem.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The deadline definition is out of range (day 0–6, hour 0–23).
    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
