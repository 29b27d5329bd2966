use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::data::DataParsingError;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("email is already registered")]
    AlreadyRegistered,

    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),

    #[error("store error: {0}")]
    Store(#[from] crate::store::Error),

    #[error("error awaiting a tokio task: {0}")]
    TokioJoin(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::AlreadyRegistered => (StatusCode::CONFLICT, AlreadyRegistered),
            Error::DataParsing(DataParsingError::FieldMissing) => {
                (StatusCode::BAD_REQUEST, MissingInput)
            }
            Error::DataParsing(DataParsingError::NameTooLong) => {
                (StatusCode::BAD_REQUEST, NameTooLong)
            }
            Error::DataParsing(
                DataParsingError::EmailInvalid | DataParsingError::EmailTooLong,
            ) => (StatusCode::BAD_REQUEST, InvalidEmail),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the caller gets to see. The `Display` output is the public message,
/// detailed server errors never leak past the log.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Name and email are required")]
    MissingInput,
    #[display("Invalid email format")]
    InvalidEmail,
    #[display("Name is too long")]
    NameTooLong,
    #[display("Email already registered")]
    AlreadyRegistered,
    #[display("Failed to save to database")]
    ServiceError,
}
