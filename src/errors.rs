use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::booking::BookingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Invalid request body: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Booking(e) => match e {
                BookingError::MissingFields(_)
                | BookingError::BelowMinimum { .. }
                | BookingError::InvalidFormat(_)
                | BookingError::Overnight
                | BookingError::SlotTaken => StatusCode::BAD_REQUEST,
                BookingError::NotFound(_) => StatusCode::NOT_FOUND,
                BookingError::PriceOverflow { .. }
                | BookingError::ReferenceExhausted
                | BookingError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(BookingError::SlotTaken), StatusCode::BAD_REQUEST),
            (
                AppError::from(BookingError::MissingFields(vec!["name"])),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(BookingError::NotFound("FP-X".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(BookingError::Store(StoreError::Corrupt("bad".to_string()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
