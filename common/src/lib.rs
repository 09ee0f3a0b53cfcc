#![deny(clippy::unwrap_used)]

pub mod fetcher;
pub mod report;
pub mod utils;
