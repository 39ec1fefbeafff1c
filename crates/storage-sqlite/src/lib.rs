//! SQLite storage implementation for Quotesmith.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the `QuoteStoreTrait` defined in
//! `quotesmith-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The quote repository (JSON payload keyed by id)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist; the core and server crates stay database-agnostic and work with
//! traits.

pub mod db;
pub mod errors;
pub mod quotes;
pub mod schema;

pub use quotes::SqliteQuoteRepository;
