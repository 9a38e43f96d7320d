use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Engine error taxonomy.
///
/// Ledger and aggregate storage failures are separate variants so a caller
/// can tell "event mutation failed" apart from "totals update failed",
/// even though both roll the surrounding transaction back.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid catalog entry: {0}")]
    InvalidCatalogEntry(String),

    #[error("food profile {0} is referenced by logged meals")]
    ProfileInUse(Uuid),

    #[error("ledger storage failure")]
    LedgerStorage(#[source] sqlx::Error),

    #[error("aggregate storage failure")]
    AggregateStorage(#[source] sqlx::Error),

    #[error("storage failure")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    pub fn invalid_quantity(value: i64) -> Self {
        AppError::InvalidQuantity(value.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidQuantity(_) | AppError::InvalidCatalogEntry(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::ProfileInUse(_) => StatusCode::CONFLICT,
            AppError::LedgerStorage(e)
            | AppError::AggregateStorage(e)
            | AppError::Storage(e) => {
                error!(error = %e, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_offending_value() {
        let err = AppError::invalid_quantity(-3);
        assert_eq!(err.to_string(), "invalid quantity: -3");

        let err = AppError::InvalidCatalogEntry("base_quantity must be positive, got 0".into());
        assert!(err.to_string().contains("base_quantity"));

        let err = AppError::NotFound("food");
        assert_eq!(err.to_string(), "food not found");
    }
}
