//! # Sieve Architecture
//!
//! Sieve is a **UI-agnostic filter and saved-view engine** for small, fully
//! loaded record collections. A table screen hands it records, a list of
//! conditions and a field accessor, and gets back the matching subset. Condition
//! sets can be saved as named views under a storage key, one key per screen,
//! with at most one view per key marked as the default.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, reads JSON records, prints results     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + FilterSession (session.rs)            │
//! │  - Facade over commands / condition editing rules           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Saved-view operations, filtering passes                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (operators, engine, codec) + Storage (store/)       │
//! │  - Pure evaluation / KvBackend with fs and memory backends  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//!
//! Nothing in the engine panics on bad input. Absent fields read as the empty
//! string, unknown operators never match, and unreadable saved views read as
//! an empty collection. Errors are returned only where a caller can act on
//! them: invalid saves, unknown selectors, failed writes.
//!
//! ## Module Overview
//!
//! - [`model`]: `Condition`, `Column`, `FilterState`, `SavedFilter`, `SavedFilters`
//! - [`operators`]: the operator registry
//! - [`engine`]: `apply_filters`, `unique_values`
//! - [`codec`]: condition list <-> `FilterState`
//! - [`store`]: `KvBackend` and saved-view persistence
//! - [`session`]: condition editing for filter UIs
//! - [`commands`]: saved-view and filtering commands
//! - [`api`]: the facade UIs talk to
//! - [`records`]: JSON records as a concrete record type
//! - [`config`]: configuration
//! - [`error`]: error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod operators;
pub mod records;
pub mod session;
pub mod store;
