use chrono::{Duration, NaiveDate, NaiveTime};

use crate::store::{BookingStore, StoreError};

/// End of a slot that starts at `start` and lasts `hours`, or `None` when it
/// would reach or pass midnight. Slots never span two dates.
pub fn slot_end(start: NaiveTime, hours: i64) -> Option<NaiveTime> {
    if !(1..24).contains(&hours) {
        return None;
    }
    match start.overflowing_add_signed(Duration::hours(hours)) {
        (end, 0) => Some(end),
        _ => None,
    }
}

/// Whether `[start, end)` on `date` overlaps any stored booking.
pub fn has_conflict(
    store: &dyn BookingStore,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Result<bool, StoreError> {
    let bookings = store.find_by_date(date)?;
    Ok(bookings.iter().any(|b| b.overlaps(start, end)))
}
