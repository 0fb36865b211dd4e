use log::{error, warn};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;

use std::sync::PoisonError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Generic internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    pub fn not_found(what: impl Into<String>) -> TrackerError {
        TrackerError::NotFound(what.into())
    }

    pub fn invalid(what: impl Into<String>) -> TrackerError {
        TrackerError::Invalid(what.into())
    }

    pub fn status(&self) -> Status {
        match self {
            TrackerError::NotFound(_) => Status::NotFound,
            TrackerError::Invalid(_) => Status::BadRequest,
            _ => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for TrackerError {
    fn from(e: PoisonError<T>) -> TrackerError {
        TrackerError::Internal(e.to_string())
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl<'r> Responder<'r, 'static> for TrackerError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        if status == Status::InternalServerError {
            error!("{} {}: {}", request.method(), request.uri(), self);
        } else {
            warn!("{} {} rejected: {}", request.method(), request.uri(), self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .respond_to(request)
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
