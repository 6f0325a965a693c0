use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection, ErrorCode};

use crate::models::booking::{DATE_FORMAT, TIMESTAMP_FORMAT, TIME_FORMAT};
use crate::models::{Booking, BookingStatus, NewBooking};
use crate::store::StoreError;

const BOOKING_COLUMNS: &str =
    "id, name, phone, date, start_time, end_time, hours, price, reference, status, created_at";

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &NewBooking) -> Result<i64, StoreError> {
    let date = booking.date.format(DATE_FORMAT).to_string();
    let start_time = booking.start_time.format(TIME_FORMAT).to_string();
    let end_time = booking.end_time.format(TIME_FORMAT).to_string();
    let created_at = booking.created_at.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO bookings (name, phone, date, start_time, end_time, hours, price, reference, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            booking.name,
            booking.phone,
            date,
            start_time,
            end_time,
            booking.hours,
            booking.price,
            booking.reference,
            BookingStatus::Pending.as_str(),
            created_at,
        ],
    )
    .map_err(map_insert_error)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_bookings_on_date(conn: &Connection, date: NaiveDate) -> Result<Vec<Booking>, StoreError> {
    let date = date.format(DATE_FORMAT).to_string();
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE date = ?1 ORDER BY start_time ASC"
    ))?;

    let rows = stmt.query_map(params![date], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_reference(
    conn: &Connection,
    reference: &str,
) -> Result<Option<Booking>, StoreError> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE reference = ?1"),
        params![reference],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    reference: &str,
    status: BookingStatus,
) -> Result<bool, StoreError> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE reference = ?2",
        params![status.as_str(), reference],
    )?;
    Ok(count > 0)
}

pub fn get_all_bookings(conn: &Connection) -> Result<Vec<Booking>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY date ASC, start_time ASC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> Result<Booking, StoreError> {
    let id: i64 = row.get(0)?;
    let date_str: String = row.get(3)?;
    let start_str: String = row.get(4)?;
    let end_str: String = row.get(5)?;
    let status_str: String = row.get(9)?;
    let created_at_str: String = row.get(10)?;

    let corrupt = |field: &str, value: &str| StoreError::Corrupt(format!("booking {id}: {field} {value:?}"));

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|_| corrupt("date", &date_str))?;
    let start_time = NaiveTime::parse_from_str(&start_str, TIME_FORMAT)
        .map_err(|_| corrupt("start_time", &start_str))?;
    let end_time = NaiveTime::parse_from_str(&end_str, TIME_FORMAT)
        .map_err(|_| corrupt("end_time", &end_str))?;
    let status = BookingStatus::parse(&status_str).ok_or_else(|| corrupt("status", &status_str))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .map_err(|_| corrupt("created_at", &created_at_str))?;

    Ok(Booking {
        id,
        name: row.get(1)?,
        phone: row.get(2)?,
        date,
        start_time,
        end_time,
        hours: row.get(6)?,
        price: row.get(7)?,
        reference: row.get(8)?,
        status,
        created_at,
    })
}

/// Turns the schema's constraint failures into the store's typed errors.
fn map_insert_error(err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(e, Some(msg)) = &err {
        if e.code == ErrorCode::ConstraintViolation {
            if msg.contains("bookings.reference") {
                return StoreError::DuplicateReference;
            }
            if msg.contains("slot overlaps") {
                return StoreError::SlotTaken;
            }
        }
    }
    StoreError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn new_booking(reference: &str, date: &str, start: &str, end: &str) -> NewBooking {
        NewBooking {
            name: "Ada".to_string(),
            phone: "08030000000".to_string(),
            date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            start_time: NaiveTime::parse_from_str(start, TIME_FORMAT).unwrap(),
            end_time: NaiveTime::parse_from_str(end, TIME_FORMAT).unwrap(),
            hours: 1,
            price: 10_000,
            reference: reference.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_insert_and_fetch_by_reference() {
        let conn = db::init_db(":memory:").unwrap();
        let id = insert_booking(&conn, &new_booking("FP-A", "2025-06-01", "10:00", "11:00")).unwrap();

        let fetched = get_booking_by_reference(&conn, "FP-A").unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.status, BookingStatus::Pending);
        assert_eq!(fetched.time_range(), "10:00 - 11:00");
        assert!(get_booking_by_reference(&conn, "FP-B").unwrap().is_none());
    }

    #[test]
    fn test_trigger_rejects_overlap() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, &new_booking("FP-A", "2025-06-01", "10:00", "12:00")).unwrap();

        let err = insert_booking(&conn, &new_booking("FP-B", "2025-06-01", "11:00", "12:00"))
            .unwrap_err();
        assert!(matches!(err, StoreError::SlotTaken));

        // Abutting and other-date slots are fine.
        insert_booking(&conn, &new_booking("FP-C", "2025-06-01", "12:00", "13:00")).unwrap();
        insert_booking(&conn, &new_booking("FP-D", "2025-06-02", "10:00", "12:00")).unwrap();
    }

    #[test]
    fn test_unique_reference() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, &new_booking("FP-A", "2025-06-01", "10:00", "11:00")).unwrap();

        let err = insert_booking(&conn, &new_booking("FP-A", "2025-06-03", "10:00", "11:00"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateReference));
    }

    #[test]
    fn test_all_bookings_ordered_by_date_then_start() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, &new_booking("FP-1", "2025-06-02", "08:00", "09:00")).unwrap();
        insert_booking(&conn, &new_booking("FP-2", "2025-06-01", "15:00", "16:00")).unwrap();
        insert_booking(&conn, &new_booking("FP-3", "2025-06-01", "09:00", "10:00")).unwrap();

        let refs: Vec<String> = get_all_bookings(&conn)
            .unwrap()
            .into_iter()
            .map(|b| b.reference)
            .collect();
        assert_eq!(refs, vec!["FP-3", "FP-2", "FP-1"]);
    }

    #[test]
    fn test_update_status() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, &new_booking("FP-A", "2025-06-01", "10:00", "11:00")).unwrap();

        assert!(update_booking_status(&conn, "FP-A", BookingStatus::Confirmed).unwrap());
        assert!(!update_booking_status(&conn, "FP-NOPE", BookingStatus::Confirmed).unwrap());

        let fetched = get_booking_by_reference(&conn, "FP-A").unwrap().unwrap();
        assert_eq!(fetched.status, BookingStatus::Confirmed);
    }
}
