//! Error types for workday-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkdayError {
    #[error("Invalid workday window: {0}")]
    InvalidWindow(String),

    #[error("Invalid holiday: {0}")]
    InvalidHoliday(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid calendar config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, WorkdayError>;
