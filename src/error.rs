use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Failures while loading the survey file. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record on row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("invalid value {value:?} for column {column} on row {row}, expected yes or no")]
    InvalidFlag {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("data file contains no records")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("grade range is inverted: min {min} > max {max}")]
    Inverted { min: u32, max: u32 },
}

/// Request-level errors returned by the JSON endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Range(#[from] RangeError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Range(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
