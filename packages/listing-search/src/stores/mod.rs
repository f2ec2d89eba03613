//! Stage result store implementations.

mod memory;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
