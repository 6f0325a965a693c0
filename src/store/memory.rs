use std::sync::Mutex;

use chrono::NaiveDate;

use super::{BookingStore, StoreError};
use crate::models::{Booking, BookingStatus, NewBooking};

/// Process-local store with the same guarantees as the SQLite one.
#[derive(Default)]
pub struct MemoryStore {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for MemoryStore {
    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, StoreError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter().filter(|b| b.date == date).cloned().collect())
    }

    fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, StoreError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter().find(|b| b.reference == reference).cloned())
    }

    fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let mut bookings = self.bookings.lock().unwrap();

        if bookings.iter().any(|b| b.reference == booking.reference) {
            return Err(StoreError::DuplicateReference);
        }
        if bookings
            .iter()
            .any(|b| b.date == booking.date && b.overlaps(booking.start_time, booking.end_time))
        {
            return Err(StoreError::SlotTaken);
        }

        let id = bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let booking = booking.into_booking(id);
        bookings.push(booking.clone());
        Ok(booking)
    }

    fn update_status(&self, reference: &str, status: BookingStatus) -> Result<bool, StoreError> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.iter_mut().find(|b| b.reference == reference) {
            Some(b) => {
                b.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_ordered(&self) -> Result<Vec<Booking>, StoreError> {
        let mut bookings = self.bookings.lock().unwrap().clone();
        bookings.sort_by_key(|b| (b.date, b.start_time));
        Ok(bookings)
    }
}
