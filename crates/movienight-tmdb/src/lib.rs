//! `movienight-tmdb` — movie metadata lookup against The Movie Database.
//!
//! One public operation: search by title, returning at most one fully
//! built [`movienight_core::Movie`]. "Nothing matched" is `Ok(None)`,
//! not an error; only transport and API faults surface as [`TmdbError`].

mod client;
pub mod error;
pub mod models;

pub use client::TmdbClient;
pub use error::TmdbError;

pub type Result<T> = std::result::Result<T, TmdbError>;
