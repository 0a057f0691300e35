//! SyncRAG Core - Synchronization-state model
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Entry`, `File`, `Directory`, `SynchronizedItem`, `Status`
//! - **Port definitions** - Traits for adapters: `IRagProvider`, `ILocalFileSystem`
//! - **Configuration** - YAML-backed settings shared by the CLI and the sync driver
//!
//! # Architecture
//!
//! The domain module is pure in-memory state with no I/O. It pairs local
//! filesystem snapshots with remote catalog entries in a tree and lets a
//! synchronization driver broadcast statuses over whole subtrees.
//! Ports define trait interfaces that adapter crates implement.

pub mod config;
pub mod domain;
pub mod ports;
