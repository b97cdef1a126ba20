//! mockraft-core
//!
//! Pure domain types, the shared question-type vocabulary, key conventions,
//! and the statistics reduction. No I/O, no SDK dependency.

pub mod error;
pub mod keys;
pub mod models;
pub mod stats;
