use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::{Connection, TransactionBehavior};

use super::{BookingStore, StoreError};
use crate::db::queries;
use crate::models::{Booking, BookingStatus, NewBooking};

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl BookingStore for SqliteStore {
    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, StoreError> {
        let db = self.conn.lock().unwrap();
        queries::get_bookings_on_date(&db, date)
    }

    fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, StoreError> {
        let db = self.conn.lock().unwrap();
        queries::get_booking_by_reference(&db, reference)
    }

    fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let mut db = self.conn.lock().unwrap();
        // Dropping the transaction on error rolls the write back.
        let tx = db.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = queries::insert_booking(&tx, &booking)?;
        tx.commit()?;
        Ok(booking.into_booking(id))
    }

    fn update_status(&self, reference: &str, status: BookingStatus) -> Result<bool, StoreError> {
        let db = self.conn.lock().unwrap();
        queries::update_booking_status(&db, reference, status)
    }

    fn list_ordered(&self) -> Result<Vec<Booking>, StoreError> {
        let db = self.conn.lock().unwrap();
        queries::get_all_bookings(&db)
    }
}
