use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_password: String,
    pub price_per_hour: i64,
    pub min_hours: i64,
    pub payment: PaymentDetails,
}

/// Where customers send the booking fee. Display data only.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PaymentDetails {
    pub bank: String,
    pub account_name: String,
    pub account_number: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "football_booking.db".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "changeme".to_string()),
            price_per_hour: env::var("PRICE_PER_HOUR")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(10_000)
                .max(0),
            min_hours: env::var("MIN_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(1)
                .max(1),
            payment: PaymentDetails {
                bank: env::var("BANK_NAME").unwrap_or_else(|_| "Access Bank".to_string()),
                account_name: env::var("ACCOUNT_NAME")
                    .unwrap_or_else(|_| "Elite Football Pitch".to_string()),
                account_number: env::var("ACCOUNT_NUMBER")
                    .unwrap_or_else(|_| "0123456789".to_string()),
            },
        }
    }
}
