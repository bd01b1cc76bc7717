#![forbid(unsafe_code)]

pub mod codec;
pub mod repository;
pub mod sqlite;

pub use repository::{
    CompletionRepository, DEFAULT_PROGRESS_KEY, InMemoryRepository, Storage, StorageError,
};
