//! # Dirdex Architecture
//!
//! Dirdex is a **UI-agnostic catalog client library** with a CLI front
//! end. The hard part is not the terminal output — it is deciding when a
//! locally persisted snapshot of the remote directory catalog can be
//! trusted, how to degrade when the remote is slow or down, and how to
//! filter, sort and paginate the collection deterministically.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                                │
//! │  - Parses arguments, renders tables, owns stdout/stderr      │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                         │
//! │  - Single entry point, dispatches to commands                │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                               │
//! │  - One module per user operation, returns CmdResult          │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Engine (cache.rs + filter.rs)                               │
//! │  - Freshness policy, stale fallback, filter/sort/paginate    │
//! │  - Generic over CacheStore (store/) and RemoteFetcher        │
//! │    (remote.rs)                                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Offline behavior
//!
//! Implicit reads (`list`, `search`, `export`) serve any readable local
//! snapshot when the remote fails, however old. The explicit `sync`
//! command surfaces every failure. See `cache.rs` for the state machine.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns
//! `Result<CmdResult>`, and never writes to stdout or exits the process.
//! Cancellation is cooperative via `remote::CancelToken`.
//!
//! ## Module Overview
//!
//! - [`api`]: the API facade — entry point for all operations
//! - [`commands`]: one module per user-facing operation
//! - [`cache`]: freshness policy and the fetch orchestrator
//! - [`filter`]: filter engine and sort/paginate stage
//! - [`store`]: persisted snapshot abstraction and backends
//! - [`remote`]: remote fetcher trait and HTTP implementation
//! - [`export`]: CSV / JSON / Markdown writers
//! - [`model`]: core data types (`Directory`, `FilterSpec`)
//! - [`config`]: configuration loading and persistence
//! - [`error`]: error taxonomy

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod remote;
pub mod store;
