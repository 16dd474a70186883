//! Core domain logic for the project tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Project, ProjectId, DEFAULT_COVER_IMAGE};
pub use repo::project_repo::{
    MemoryProjectRepository, ProjectRepository, RepoError, RepoResult, SqliteProjectRepository,
    PROJECTS_SLOT_KEY,
};
pub use service::project_service::{
    derive_view, DraftField, ListQuery, ProjectDraft, ProjectService, ProjectServiceError,
    SortOrder,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
