#![forbid(unsafe_code)]

pub mod repository;
pub mod snapshot;

pub use repository::{DeckRepository, InMemoryRepository, StorageError};
pub use snapshot::JsonSnapshot;
