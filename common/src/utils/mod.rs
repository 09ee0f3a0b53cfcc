//! Common utilities
pub mod set;
pub mod url;
