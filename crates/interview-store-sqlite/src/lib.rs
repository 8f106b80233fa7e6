//! SQLite document store for interviews and users.
//!
//! Each interview is one JSON document in its own row; comments live inline
//! in that document. Wraps [`tokio_rusqlite`] so all database access runs on a
//! dedicated thread without blocking the async runtime.

mod encode;
mod schema;
mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::Collections;
pub use seed::SeedReport;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
