//! # Docvault Architecture
//!
//! Docvault is a local document vault for a five-day training curriculum: files are
//! uploaded per day, listed per day, downloaded again, and counted against a soft
//! storage quota. There is no server. Metadata lives in a single JSON slot, content in
//! a small transactional blob database.
//!
//! Like any UI-agnostic core, the library never prints and never exits; the `docvault`
//! binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Maps subcommands to gestures, renders view models        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Dispatches gestures, owns AppState, re-projects views    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)  +  View Projector (view.rs) │
//! │  - One module per gesture       - Pure state → view models  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Repository over a SlotStore (metadata) and BlobStore     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: the action dispatcher, entry point for all operations
//! - [`commands`]: business logic for each gesture
//! - [`view`]: view models for navigation, day cards, file list and usage
//! - [`store`]: slot store, blob store and the repository joining them
//! - [`catalog`]: the fixed training days
//! - [`download`]: temporary object urls and download sinks
//! - [`model`]: core data types (`FileRecord`, `DayDescriptor`, `AppState`)
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod model;
pub mod store;
pub mod view;
