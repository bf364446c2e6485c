use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type TableId = i64;
pub type BookingId = i64;

pub type RestaurantResult<T> = Result<T, RestaurantError>;

/// Failure of a restaurant operation, returned as-is to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestaurantError {
    /// Malformed input: non-positive seats, blank names, bad phone, empty interval
    #[error("{0}")]
    Validation(String),
    /// Unknown table or booking id
    #[error("{0}")]
    NotFound(String),
    /// Booking overlap or a table that is still in use
    #[error("{0}")]
    Conflict(String),
    /// Redundant state transition
    #[error("{0}")]
    InvalidState(String),
}

impl RestaurantError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn table_not_found(id: TableId) -> Self {
        Self::NotFound(format!("Table with id {id} not found"))
    }

    pub fn booking_not_found(id: BookingId) -> Self {
        Self::NotFound(format!("Booking with id {id} not found"))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::InvalidState(_) => "invalid_state",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: &'a str,
}

impl ResponseError for RestaurantError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();

        HttpResponse::build(self.status_code()).json(ErrorBody { error: self.kind(), message: &message })
    }
}

#[derive(Debug, Error)]
#[error("Invalid configuration: {0}")]
pub struct SettingsError(#[from] pub config::ConfigError);

impl From<SettingsError> for std::io::Error {
    fn from(err: SettingsError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
