//! mockraft-storage
//!
//! Document store for interview records. The [`store::InterviewStore`] trait
//! is the seam; S3 JSON objects back it in production and a process-local map
//! backs it in development and tests.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;
