use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::booking::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::state::AppState;

const ADMIN_HEADER: &str = "x-admin-password";

fn check_auth(headers: &HeaderMap, expected_password: &str) -> Result<(), AppError> {
    let given = headers
        .get(ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if given.is_empty() || given != expected_password {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/bookings
#[derive(Serialize)]
pub struct BookingResponse {
    name: String,
    phone: String,
    date: String,
    time: String,
    hours: i64,
    price: i64,
    reference: String,
    status: &'static str,
    created_at: String,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_password)?;

    let bookings = state.bookings.list_bookings()?;

    let response: Vec<BookingResponse> = bookings
        .into_iter()
        .map(|b| BookingResponse {
            date: b.date.format(DATE_FORMAT).to_string(),
            time: b.time_range(),
            created_at: b.created_at.format(TIMESTAMP_FORMAT).to_string(),
            status: b.status.as_str(),
            name: b.name,
            phone: b.phone,
            hours: b.hours,
            price: b.price,
            reference: b.reference,
        })
        .collect();

    Ok(Json(response))
}

// POST /api/admin/confirm/:reference
#[derive(Serialize)]
pub struct ConfirmResponse {
    message: String,
    reference: String,
    status: &'static str,
    already_confirmed: bool,
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(reference): Path<String>,
) -> Result<Json<ConfirmResponse>, AppError> {
    check_auth(&headers, &state.config.admin_password)?;

    let confirmation = state.bookings.confirm_booking(&reference)?;

    Ok(Json(ConfirmResponse {
        message: format!("Booking {reference} confirmed"),
        status: confirmation.booking.status.as_str(),
        already_confirmed: confirmation.already_confirmed,
        reference,
    }))
}
