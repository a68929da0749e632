use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{success, data, timestamp}` wrapper the frontend expects around every
/// scraped payload.
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Envelope {
            success: true,
            data,
            timestamp: Utc::now(),
        }
    }
}
