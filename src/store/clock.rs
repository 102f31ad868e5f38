//! Time and identifier sources used when cards are created or reviewed.
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Must hand out ids that are unique for the lifetime of the store.
pub trait IdGenerator {
    fn new_id(&self) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
