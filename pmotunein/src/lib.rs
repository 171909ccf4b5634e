//! TuneIn client library for PMOMusic
//!
//! This crate provides a Rust client for TuneIn's OPML directory API
//! (`opml.radiotime.com`): free text search, stream resolution and
//! directory browsing.
//!
//! # Features
//!
//! - **Search**: stations, shows and topics matching a query
//! - **Tune**: stream locations for a guide id
//! - **Browse**: root categories (local, music, talk, sports, languages,
//!   podcasts, trending, best) and any sub-directory by guide id
//! - **Parsed URLs**: every top-level item carrying a `URL` also gets a
//!   structured `URLObj` (scheme, host, path, decoded query)
//!
//! # Example
//!
//! ```no_run
//! use pmotunein::{BrowseOptions, TuneInClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TuneInClient::new()?;
//!
//!     // Root categories
//!     let root = client.browse(&BrowseOptions::default()).await?;
//!     for item in &root.body {
//!         if let Some(obj) = &item.url_obj {
//!             println!("{:<20} c={:?}", item.text.as_deref().unwrap_or(""), obj.query_param("c"));
//!         }
//!     }
//!
//!     // Search
//!     let results = client.search("jazz").await?;
//!     println!("{} results", results.body.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Each call has exactly one outcome. A TuneIn envelope whose
//! `head.status` is not 200 becomes [`Error::RemoteFault`] with the whole
//! envelope attached. Network and decoding problems are transport errors
//! (see [`Error::is_transport`]). Nothing is retried.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod request;

// Re-exports
pub use client::{ClientBuilder, TuneInClient};
pub use config::{TuneInConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use models::{Envelope, Head, Item, Status, UrlObj};
pub use request::{BrowseOptions, Category, Endpoint, Request};
