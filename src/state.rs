use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::booking::BookingService;
use crate::store::{BookingStore, SqliteStore};

pub struct AppState {
    pub config: AppConfig,
    pub bookings: BookingService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn BookingStore>) -> Self {
        let bookings = BookingService::new(store, config.price_per_hour, config.min_hours);
        Self { config, bookings }
    }

    pub fn with_sqlite(config: AppConfig, conn: Connection) -> Self {
        let store = SqliteStore::new(Arc::new(Mutex::new(conn)));
        Self::new(config, Arc::new(store))
    }
}
