pub mod advisory;
pub mod metadata;
pub mod rolie;
pub mod tlp;
