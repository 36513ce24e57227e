//! # Jot Architecture
//!
//! Jot is a **UI-agnostic entry store** for short markdown documents. The `jot`
//! binary is one client of this library; a web front end would be another.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Layer (the jot CLI, or any other client)                │
//! │  - Parses input, prints output, owns exit codes             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - create / update / get / list / search / render / history │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - EntryStore: id resolution, archival, versioning, search  │
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code returns `Result<T, JotError>`, never prints and never
//! exits. Diagnostics go through the `log` facade; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`store`]: Entry store, backends, file naming
//! - [`model`]: `Entry`, `SearchMatch`, `ArchivedVersion`
//! - [`render`]: Markdown to HTML
//! - [`config`]: Configuration
//! - [`init`]: Store bootstrap from configuration
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod render;
pub mod store;
