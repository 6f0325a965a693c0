pub mod memory;
pub mod sqlite;

use chrono::NaiveDate;

use crate::models::{Booking, BookingStatus, NewBooking};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("slot overlaps an existing booking")]
    SlotTaken,

    #[error("reference already in use")]
    DuplicateReference,

    #[error("corrupt booking row: {0}")]
    Corrupt(String),
}

/// Durable collection of bookings.
///
/// `insert` is atomic with respect to the two booking invariants: it must
/// refuse a row that overlaps another booking on the same date
/// (`SlotTaken`) or that reuses a reference (`DuplicateReference`), even when
/// the caller's own conflict check raced with another writer.
pub trait BookingStore: Send + Sync {
    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, StoreError>;

    fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, StoreError>;

    /// Persists a pending booking and returns it with its assigned id.
    fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    /// Returns `false` when no booking has that reference.
    fn update_status(&self, reference: &str, status: BookingStatus) -> Result<bool, StoreError>;

    /// All bookings ordered by date, then start time.
    fn list_ordered(&self) -> Result<Vec<Booking>, StoreError>;
}
