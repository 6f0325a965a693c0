use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::models::booking::{DATE_FORMAT, TIME_FORMAT};
use crate::models::{Booking, BookingRequest, BookingStatus, NewBooking};
use crate::services::reference::generate_reference;
use crate::services::scheduling::{has_conflict, slot_end};
use crate::store::{BookingStore, StoreError};

/// How many times an insert rejected for a reused reference is retried.
const INSERT_ATTEMPTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Minimum booking is {min_hours} hour(s)")]
    BelowMinimum { min_hours: i64 },

    #[error("{0}")]
    InvalidFormat(String),

    #[error("Bookings must end by midnight")]
    Overnight,

    #[error("Time slot already booked")]
    SlotTaken,

    #[error("Booking {0} not found")]
    NotFound(String),

    #[error("price for {hours} hour(s) exceeds the representable range")]
    PriceOverflow { hours: i64 },

    #[error("could not generate a unique booking reference")]
    ReferenceExhausted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct Confirmation {
    pub booking: Booking,
    pub already_confirmed: bool,
}

/// A request that passed validation, reduced to the slot being asked for.
#[derive(Debug, Clone, PartialEq)]
struct SlotRequest {
    name: String,
    phone: String,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    hours: i64,
}

pub struct BookingService {
    store: Arc<dyn BookingStore>,
    price_per_hour: i64,
    min_hours: i64,
    // Serializes check-then-insert within this process.
    write_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, price_per_hour: i64, min_hours: i64) -> Self {
        Self {
            store,
            price_per_hour,
            min_hours,
            write_lock: Mutex::new(()),
        }
    }

    pub fn price_for(&self, hours: i64) -> Result<i64, BookingError> {
        hours
            .checked_mul(self.price_per_hour)
            .ok_or(BookingError::PriceOverflow { hours })
    }

    pub fn create_booking(&self, request: &BookingRequest) -> Result<Booking, BookingError> {
        let slot = self.validate(request)?;
        let price = self.price_for(slot.hours)?;

        let _guard = self.write_lock.lock().unwrap();

        if has_conflict(self.store.as_ref(), slot.date, slot.start_time, slot.end_time)? {
            tracing::info!(date = %slot.date, start = %slot.start_time, "slot already booked");
            return Err(BookingError::SlotTaken);
        }

        for _ in 0..INSERT_ATTEMPTS {
            let now = Utc::now();
            let reference = generate_reference(self.store.as_ref(), now)?;
            let new_booking = NewBooking {
                name: slot.name.clone(),
                phone: slot.phone.clone(),
                date: slot.date,
                start_time: slot.start_time,
                end_time: slot.end_time,
                hours: slot.hours,
                price,
                reference,
                created_at: now.naive_utc(),
            };

            match self.store.insert(new_booking) {
                Ok(booking) => {
                    tracing::info!(
                        reference = %booking.reference,
                        date = %booking.date,
                        slot = %booking.time_range(),
                        price = booking.price,
                        "booking created"
                    );
                    return Ok(booking);
                }
                Err(StoreError::DuplicateReference) => {
                    tracing::warn!("reference taken at insert time, regenerating");
                }
                Err(StoreError::SlotTaken) => {
                    tracing::info!(date = %slot.date, start = %slot.start_time, "slot taken by a concurrent writer");
                    return Err(BookingError::SlotTaken);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to persist booking");
                    return Err(e.into());
                }
            }
        }

        Err(BookingError::ReferenceExhausted)
    }

    pub fn confirm_booking(&self, reference: &str) -> Result<Confirmation, BookingError> {
        let mut booking = self
            .store
            .find_by_reference(reference)?
            .ok_or_else(|| BookingError::NotFound(reference.to_string()))?;

        if booking.status == BookingStatus::Confirmed {
            return Ok(Confirmation {
                booking,
                already_confirmed: true,
            });
        }

        if !self.store.update_status(reference, BookingStatus::Confirmed)? {
            return Err(BookingError::NotFound(reference.to_string()));
        }
        booking.status = BookingStatus::Confirmed;
        tracing::info!(reference, "booking confirmed");

        Ok(Confirmation {
            booking,
            already_confirmed: false,
        })
    }

    pub fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.store.list_ordered()?)
    }

    fn validate(&self, request: &BookingRequest) -> Result<SlotRequest, BookingError> {
        let missing = request.missing_fields();
        let (Some(name), Some(phone), Some(date), Some(start_time), Some(duration)) = (
            request.name.as_deref(),
            request.phone.as_deref(),
            request.date.as_deref(),
            request.start_time.as_deref(),
            request.duration.as_ref(),
        ) else {
            return Err(BookingError::MissingFields(missing));
        };
        if !missing.is_empty() {
            return Err(BookingError::MissingFields(missing));
        }

        let hours = duration.hours().ok_or_else(|| {
            BookingError::InvalidFormat("Duration must be a whole number of hours".to_string())
        })?;
        if hours < self.min_hours {
            return Err(BookingError::BelowMinimum {
                min_hours: self.min_hours,
            });
        }

        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
            BookingError::InvalidFormat("Invalid date format, expected YYYY-MM-DD".to_string())
        })?;
        let start_time = NaiveTime::parse_from_str(start_time.trim(), TIME_FORMAT).map_err(|_| {
            BookingError::InvalidFormat("Invalid time format, expected HH:MM".to_string())
        })?;
        let end_time = slot_end(start_time, hours).ok_or(BookingError::Overnight)?;

        Ok(SlotRequest {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            date,
            start_time,
            end_time,
            hours,
        })
    }
}
