//! Core types and trait definitions for the interview tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend and the API layer both depend on it.

pub mod comment;
pub mod error;
pub mod interview;
pub mod password;
pub mod store;
pub mod user;

pub use error::{Error, Result};
