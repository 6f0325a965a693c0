use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::config::PaymentDetails;
use crate::errors::AppError;
use crate::models::booking::DATE_FORMAT;
use crate::models::BookingRequest;
use crate::state::AppState;

// POST /api/book
#[derive(Serialize)]
pub struct BookResponse {
    message: &'static str,
    name: String,
    phone: String,
    date: String,
    time: String,
    hours: i64,
    price: i64,
    reference: String,
    payment_details: PaymentDetails,
    status: &'static str,
}

pub async fn book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let booking = state.bookings.create_booking(&request)?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Booking created successfully",
            time: booking.time_range(),
            date: booking.date.format(DATE_FORMAT).to_string(),
            name: booking.name,
            phone: booking.phone,
            hours: booking.hours,
            price: booking.price,
            reference: booking.reference,
            payment_details: state.config.payment.clone(),
            status: booking.status.as_str(),
        }),
    ))
}
