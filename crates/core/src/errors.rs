use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanteenError {
    #[error("Could not load availability: {}", .message.as_deref().unwrap_or("network error"))]
    AvailabilityFetch { message: Option<String> },

    #[error("Reservation conflict: {0}")]
    ReservationConflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CanteenResult<T> = Result<T, CanteenError>;
