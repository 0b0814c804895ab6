//! sehat-core
//!
//! Pure domain types for the screening backend: patient inputs, AI
//! assessments, stored records and trend buckets. No storage or network
//! dependency; the other crates share this vocabulary.

pub mod error;
pub mod models;
