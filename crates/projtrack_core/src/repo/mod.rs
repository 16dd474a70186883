//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable-storage contract for the project set.
//! - Isolate slot/SQL details from service/business orchestration.
//!
//! # Invariants
//! - `load` never fails: missing or corrupt slot data degrades to an empty
//!   set instead of surfacing an error.
//! - `replace_all` overwrites the whole slot in one atomic write.

pub mod project_repo;
