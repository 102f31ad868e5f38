//! In-memory collaborators for store and quiz tests.
use super::{Clock, IdGenerator};
use crate::database::db::{CardRepository, Result, StorageError};
use crate::models::Flashcard;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Records every save so tests can inspect what was written.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    pub stored: Rc<RefCell<Vec<Flashcard>>>,
    pub saves: Rc<Cell<usize>>,
    pub fail_saves: Rc<Cell<bool>>,
}

impl CardRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<Flashcard>> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, cards: &[Flashcard]) -> Result<()> {
        if self.fail_saves.get() {
            return Err(StorageError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        self.saves.set(self.saves.get() + 1);
        *self.stored.borrow_mut() = cards.to_vec();
        Ok(())
    }
}

/// Repository whose stored data cannot be read.
pub struct BrokenRepository;

impl CardRepository for BrokenRepository {
    fn load(&self) -> Result<Vec<Flashcard>> {
        Err(StorageError::Json(
            serde_json::from_str::<Vec<Flashcard>>("not json").unwrap_err(),
        ))
    }

    fn save(&self, _cards: &[Flashcard]) -> Result<()> {
        Ok(())
    }
}

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock(pub Rc<Cell<DateTime<Utc>>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self(Rc::new(Cell::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        )))
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, minutes: i64) {
        self.0.set(self.0.get() + Duration::minutes(minutes));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.get()
    }
}

/// Hands out `card-1`, `card-2`, ...
#[derive(Default)]
pub struct SequentialIds(Cell<u32>);

impl IdGenerator for SequentialIds {
    fn new_id(&self) -> String {
        self.0.set(self.0.get() + 1);
        format!("card-{}", self.0.get())
    }
}
