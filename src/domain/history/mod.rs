pub mod dto;
pub mod handler;
pub mod store;

pub use dto::{ExportDocument, HistoryEntry};
pub use store::HistoryStore;
