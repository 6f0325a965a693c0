use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hours: i64,
    pub price: i64,
    pub reference: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// `"HH:MM - HH:MM"`, the way slots are shown to customers and admins.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format(TIME_FORMAT),
            self.end_time.format(TIME_FORMAT)
        )
    }

    /// Half-open overlap test against `[start, end)` on the same date.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start < self.end_time && end > self.start_time
    }
}

/// A booking that has passed validation but has no id yet.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hours: i64,
    pub price: i64,
    pub reference: String,
    pub created_at: NaiveDateTime,
}

impl NewBooking {
    pub fn into_booking(self, id: i64) -> Booking {
        Booking {
            id,
            name: self.name,
            phone: self.phone,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            hours: self.hours,
            price: self.price,
            reference: self.reference,
            status: BookingStatus::Pending,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(BookingStatus::Pending),
            "Confirmed" => Some(BookingStatus::Confirmed),
            _ => None,
        }
    }
}
