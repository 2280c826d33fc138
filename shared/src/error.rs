//! Error kinds reported through the status line.

use thiserror::Error;

/// Every failure is terminal for the call that produced it. The app surfaces the
/// `Display` text in the single status slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A subsystem has no configuration and stays disabled.
    #[error("{subsystem} is not configured")]
    ConfigMissing { subsystem: &'static str },

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("sign-in failed: {0}")]
    AuthFailure(String),

    #[error("leaderboard sync failed: {0}")]
    SyncFailure(String),

    #[error("submit failed: {0}")]
    SubmitFailure(String),
}

impl AppError {
    pub fn submit(reason: impl Into<String>) -> Self {
        Self::SubmitFailure(reason.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
