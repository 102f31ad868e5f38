pub mod card_store;
pub mod clock;

#[cfg(test)]
pub(crate) mod testing;

pub use card_store::CardStore;
pub use clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
