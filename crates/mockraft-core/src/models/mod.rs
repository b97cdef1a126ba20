pub mod interview;
pub mod stats;
pub mod user;
