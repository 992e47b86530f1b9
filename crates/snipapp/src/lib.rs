//! # Snip Architecture
//!
//! Snip is a **UI-agnostic snippet library**. Users register, log in, and keep short
//! numbered code snippets that only their owner may change. The library knows nothing
//! about terminals or HTTP: the `snip` binary is one client, a web frontend could be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (crates/snip)                                       │
//! │  - Parses arguments, keeps the session file, renders views  │
//! │  - Follows redirects by issuing GETs for the target route   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One method per route (form + process)                    │
//! │  - Authorization gate, flash messages, redirects            │
//! │  - Turns recoverable errors into flash + redirect           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Snippet lifecycle and credential flows                   │
//! │  - Typed `SnipError` failures, no session knowledge         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, sequence.rs)                        │
//! │  - `DataStore` trait over a `StorageBackend`                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! │  - Atomic id sequence with reset-on-empty                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//!
//! Snippets are numbered 1, 2, 3... by a persistent sequence. Numbers are never reused
//! while any snippet exists; once the last snippet is deleted the sequence restarts at 1.
//! See [`sequence`] for the allocation rules.
//!
//! ## Ownership
//!
//! Every snippet records the username that created it. Only that user may update or
//! delete it, see [`policy`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for every route
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`sequence`]: Snippet id allocation
//! - [`policy`]: Ownership rule
//! - [`auth`]: Password hashing
//! - [`session`]: Per-request session and flash message
//! - [`model`]: Core data types (`Snippet`, `User`)
//! - [`config`]: Configuration loading
//! - [`error`]: Error types

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod policy;
pub mod sequence;
pub mod session;
pub mod store;
