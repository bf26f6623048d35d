//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: Redis-backed and in-memory user stores
//!
//! Adapters are thin translators between domain types and the store's item
//! representation. They contain no business logic.

pub mod persistence;
