//! # Pageflow
//!
//! A minimal, Rust-native coordinator for cursor-based pagination.
//!
//! Given a way to request a first page and a way to request more, `pageflow`
//! runs the whole request lifecycle for you: in-flight cancellation when a
//! new query supersedes the old one, cursor tracking, result accumulation,
//! and a loading indicator. Callers stop re-implementing this state machine
//! per screen or per query.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pageflow::{FnSource, Pager, PagerConfig};
//!
//! #[tokio::main]
//! async fn main() -> pageflow::Result<()> {
//!     let source = FnSource::new(
//!         |query: Query| client.search(query),
//!         |cursor: String| client.search_after(cursor),
//!         |env: &SearchResponse| env.hits.clone(),
//!         |env: &SearchResponse| env.next_cursor.clone(),
//!     );
//!
//!     let pager = Pager::builder(source)
//!         .config(PagerConfig::new().with_clear_on_new_request(true))
//!         .spawn();
//!
//!     let mut values = pager.values();
//!     let mut loading = pager.loading();
//!
//!     pager.query(Query::new("rust"))?;
//!     values.changed().await.ok();        // first page arrived
//!     pager.load_more()?;                 // next page via the stored cursor
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Pager                              │
//! │  query(Params)   load_more()   values() ─▶ watch<Vec<V>>    │
//! │                                loading() ─▶ watch<bool>     │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ commands
//! ┌──────────────────────────────┴──────────────────────────────┐
//! │                     Driver (one task)                       │
//! ├───────────────┬───────────────┬───────────────┬─────────────┤
//! │   Session     │  Accumulate   │    Source     │   Config    │
//! │ cursor store  │ concat        │ fetch_first   │ clear flag  │
//! │ exhausted     │ dedup_concat  │ fetch_next    │ fetch delay │
//! │ latch         │               │ extractors    │             │
//! └───────────────┴───────────────┴───────────────┴─────────────┘
//! ```
//!
//! All pagination state lives on one driver task. Starting a new query drops
//! the in-flight fetch future, so a superseded session can never produce a
//! late emission. Transport failures are absorbed: they only flip the loading
//! flag back off.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for pageflow
pub mod error;

/// Pager configuration
pub mod config;

/// Page source abstraction and closure adapter
pub mod source;

/// Result accumulation (merge functions)
pub mod accumulate;

/// Per-session pagination state machine
pub mod session;

/// The pagination coordinator
pub mod pager;

// ============================================================================
// Re-exports
// ============================================================================

pub use accumulate::{concat, dedup_concat, Concater};
pub use config::PagerConfig;
pub use error::{Error, Result};
pub use pager::{Pager, PagerBuilder};
pub use session::{PageOutcome, Session};
pub use source::{FetchRequest, FnSource, Page, PageSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
