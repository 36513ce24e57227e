//! # Jot CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/jot/src/cli/)                            │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging, context wiring, dispatch (mod.rs)               │
//! │  - terminal formatting (render.rs)                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/jotapp)                                    │
//! │  - JotApi facade over the entry store                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the CLI returns `Result` and never prints; errors surface here
//! as `Error: <message>` on stderr with exit code 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
