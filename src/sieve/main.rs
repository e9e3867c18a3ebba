//! # Sieve CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination. Everything the
//! CLI calls into (`api`, `commands`, `engine`, `store`) is UI agnostic and
//! lives in the `sieve` library crate.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/sieve/cli/)                                 │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal output (print.rs)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves view selectors, dispatches to commands          │
//! │  - Returns structured `CmdResult` / `Applied` values        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Engine and commands**: unit tests next to the code, against `MemBackend`.
//! - **CLI**: `tests/cli.rs` runs the binary with `assert_cmd` against a
//!   temporary data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
