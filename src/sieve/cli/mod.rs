//! # CLI Behavior
//!
//! This is **one possible UI client** for sieve, not the engine itself. It plays
//! the part a table screen plays in an application: it owns a record collection
//! (a JSON file), builds conditions, and reads and writes saved views under a
//! storage key.
//!
//! ## Choosing Conditions for `apply`
//!
//! 1. `-w field:operator:value` (repeatable): conditions given on the command line
//! 2. `--view SEL`: a saved view, by id, name or 1-based position
//! 3. `--all`: no filtering
//! 4. otherwise: the storage key's default view, if one is set
//!
//! ## Storage Keys
//!
//! `-k/--key` picks the namespace, falling back to `storage_key` from the
//! configuration. Views saved under one key are invisible to every other key.
//!
//! ## Output
//!
//! Results go to stdout; informational messages, warnings and logs go to
//! stderr, so `sieve apply --json ... | jq` works.

pub mod commands;
mod print;
mod setup;

pub use commands::run;
