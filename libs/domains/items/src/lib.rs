//! Items Domain
//!
//! Lost-and-found listings: reporting, browsing/searching active listings,
//! and resolving. This crate owns the item lifecycle and the query engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (multipart report, listing, resolve)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Draft validation, ownership checks, state transitions
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Query    │  ← Parameterized filter conditions, shared ordering
//! └─────────────┘
//! ```
//!
//! The [`mirror`] module is the client-side counterpart of [`query`]: a pure
//! predicate evaluator over an already-fetched snapshot that must stay
//! semantically identical to the SQL conditions. The equivalence is covered
//! by the integration tests in `tests/query_equivalence.rs`.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod mirror;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{Category, Item, ItemDraft, ItemFilter, ItemWithReporter, ReportStatus};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
