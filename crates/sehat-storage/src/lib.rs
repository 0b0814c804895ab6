//! sehat-storage
//!
//! SQLite persistence for screenings. Thin wrapper around an sqlx pool.

pub mod error;
pub mod schema;
pub mod store;

pub use store::ScreeningStore;
