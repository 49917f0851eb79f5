use thiserror::Error;

/// Errors that can occur during store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The weekly lock is active; suggestions reopen at the next reset.
    /// Callers translate this into a user-facing message, never a crash.
    #[error("suggestions are locked until the next cycle")]
    Locked,
}

pub type Result<T> = std::result::Result<T, StoreError>;
