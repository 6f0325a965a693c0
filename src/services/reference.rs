use chrono::{DateTime, Utc};
use rand::Rng;

use crate::services::booking::BookingError;
use crate::store::BookingStore;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 4;
const WIDE_SUFFIX_LEN: usize = 8;
const ATTEMPTS_PER_WIDTH: usize = 8;

/// `FP-YYYYMMDD-HHMM-XXXX`, stamped with the creation time in UTC.
pub fn format_reference<R: Rng>(now: DateTime<Utc>, rng: &mut R, suffix_len: usize) -> String {
    let suffix: String = (0..suffix_len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("FP-{}-{suffix}", now.format("%Y%m%d-%H%M"))
}

/// A reference not yet held by any stored booking.
///
/// Tries the normal 4-character suffix a few times, then widens it before
/// giving up. The store's unique constraint still has the final word.
pub fn generate_reference(store: &dyn BookingStore, now: DateTime<Utc>) -> Result<String, BookingError> {
    let mut rng = rand::thread_rng();
    for suffix_len in [SUFFIX_LEN, WIDE_SUFFIX_LEN] {
        for _ in 0..ATTEMPTS_PER_WIDTH {
            let candidate = format_reference(now, &mut rng, suffix_len);
            if store.find_by_reference(&candidate)?.is_none() {
                return Ok(candidate);
            }
            tracing::debug!(reference = %candidate, "reference collision, regenerating");
        }
    }
    Err(BookingError::ReferenceExhausted)
}
