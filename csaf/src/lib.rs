//! Checking CSAF ROLIE feeds
//!
//! ## Idea
//!
//! A CSAF provider may distribute its advisories using ROLIE feeds, announced in the provider
//! metadata. Each feed carries a TLP label, and must only list advisories which are allowed to
//! be shared under that label. In addition, for every label with advisories, there must be a
//! feed listing all of them. And a ROLIE service document, next to the provider metadata, must
//! list exactly the feeds of the provider metadata.
//!
//! The [`checker::Checker`] loads everything through a [`source::Source`] (most likely a
//! [`source::HttpSource`]) and collects all findings in a [`report::Report`].
//!
//! ## Example
//!
//! ```rust
//! use anyhow::Result;
//! use csaf_checker::checker::Checker;
//! use csaf_checker::source::{HttpOptions, HttpSource};
//!
//! async fn check() -> Result<()> {
//!   let source = HttpSource::with_options(Default::default(), HttpOptions::new()).await?;
//!
//!   let report = Checker::new(source)
//!     .check("https://www.redhat.com/.well-known/csaf/provider-metadata.json")
//!     .await?;
//!
//!   log::info!("Result:\n{report}");
//!
//!   Ok(())
//! }
//! ```

pub mod checker;
pub mod integrity;
pub mod label;
pub mod model;
pub mod report;
pub mod rolie;
pub mod source;

mod error;

pub use error::Error;
