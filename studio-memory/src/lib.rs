//! Local persistence for credentials and generation history.
//!
//! Everything is layered on [`KeyValueStore`]: [`FileStore`] keeps one file
//! per key under a data directory, [`VolatileStore`] keeps values in memory.
//! [`CredentialStore`] and [`HistoryStore`] hold the process-wide state and
//! write through on every change.

#![warn(missing_docs, clippy::pedantic)]

mod credential;
mod error;
mod file;
mod history;
mod store;
mod volatile;

pub use credential::{CREDENTIAL_KEY, CredentialStore};
pub use error::{MemoryError, MemoryResult};
pub use file::FileStore;
pub use history::{HISTORY_KEY, HistoryStore};
pub use store::KeyValueStore;
pub use volatile::VolatileStore;
