pub mod json;

pub use json::{TransferError, export_cards, import_cards};
