//! Domain model for tracked projects.
//!
//! # Responsibility
//! - Define the canonical Project record shape used by core business logic.
//! - Pin the persisted JSON field names so the stored blob stays stable.
//!
//! # Invariants
//! - Every record is identified by a unique `ProjectId`, immutable after
//!   creation.
//! - Deletion is a hard removal from the set; no tombstones are kept.

pub mod project;
