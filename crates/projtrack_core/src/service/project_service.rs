//! Project use-case service and derivation pipeline.
//!
//! # Responsibility
//! - Provide the list/create/update/toggle/delete entry points for UI callers.
//! - Enforce required-field validation and id-assignment rules.
//! - Compute the filtered/sorted derived view on demand.
//!
//! # Invariants
//! - Every command is one synchronous read-modify-write over the whole set.
//! - Validation failures perform no persistence.
//! - Filtering is applied before sorting; neither mutates the persisted set.

use crate::model::project::{Project, ProjectId, DEFAULT_COVER_IMAGE};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::UNIX_EPOCH;

/// Editable fields collected by the project form.
///
/// `cover_image` carries the already-encoded image string; reading the image
/// file is presentation-side work and never happens in core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub start_date: String,
    pub end_date: String,
    pub cover_image: Option<String>,
}

/// Required draft field, named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Client,
    StartDate,
    EndDate,
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Client => "client",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
        };
        write!(f, "{name}")
    }
}

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// A required field was empty; names the first one found.
    MissingRequiredField(DraftField),
    /// Target project does not exist, e.g. the caller holds a stale view.
    ProjectNotFound(ProjectId),
    /// Persistence-layer failure; the attempted change did not commit.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField(field) => write!(f, "missing required field: {field}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Sort applied to the derived view.
///
/// `Unsorted` keeps insertion order and is the defensive default for any
/// selection the UI does not recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Unsorted,
    /// Ascending by name, compared case-insensitively.
    Alphabetical,
    /// Latest start date first.
    Recent,
    /// Soonest end date first.
    Deadline,
}

/// Filter and sort options for the list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// When true, drop every record that is not a favorite.
    pub only_favorites: bool,
    /// Applies only at 3 or more characters; shorter terms pass everything
    /// through. Deliberate UX rule, not a performance one.
    pub search_term: String,
    pub sort: SortOrder,
}

/// Applies the filter/sort pipeline to a snapshot of the set.
///
/// Pure: consumes the snapshot and returns a new sequence. Filtering runs
/// before sorting; all sorts are stable.
pub fn derive_view(projects: Vec<Project>, query: &ListQuery) -> Vec<Project> {
    let search_active = query.search_term.chars().count() >= 3;

    let mut view: Vec<Project> = projects
        .into_iter()
        .filter(|project| !query.only_favorites || project.is_favorite)
        .filter(|project| !search_active || project.name_matches(&query.search_term))
        .collect();

    match query.sort {
        SortOrder::Unsorted => {}
        SortOrder::Alphabetical => {
            view.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        // ISO 8601 date strings order lexicographically the same as
        // chronologically, so plain string comparison is sufficient.
        SortOrder::Recent => view.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
        SortOrder::Deadline => view.sort_by(|a, b| a.end_date.cmp(&b.end_date)),
    }

    view
}

/// Use-case service over a project repository.
///
/// The single owner of business rules: the presentation layer calls these
/// five operations and never touches the repository directly.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the derived (filtered, sorted) view of the current set.
    pub fn list(&self, query: &ListQuery) -> Vec<Project> {
        derive_view(self.repo.load(), query)
    }

    /// Creates a new project from the draft and persists the updated set.
    ///
    /// # Contract
    /// - Assigns an id distinct from every existing id.
    /// - `is_favorite` starts false.
    /// - `cover_image` falls back to [`DEFAULT_COVER_IMAGE`] when absent.
    pub fn create(&self, draft: &ProjectDraft) -> Result<Project, ProjectServiceError> {
        validate_draft(draft)?;

        let mut projects = self.repo.load();
        let project = Project {
            id: next_project_id(&projects),
            name: draft.name.clone(),
            client: draft.client.clone(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            is_favorite: false,
            cover_image: draft_cover_image(draft),
        };

        projects.push(project.clone());
        self.repo.replace_all(&projects)?;
        Ok(project)
    }

    /// Replaces the editable fields of an existing project.
    ///
    /// `id` and `is_favorite` are preserved from the prior record.
    pub fn update(
        &self,
        id: ProjectId,
        draft: &ProjectDraft,
    ) -> Result<Project, ProjectServiceError> {
        validate_draft(draft)?;

        let mut projects = self.repo.load();
        let project = projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(ProjectServiceError::ProjectNotFound(id))?;

        project.name = draft.name.clone();
        project.client = draft.client.clone();
        project.start_date = draft.start_date.clone();
        project.end_date = draft.end_date.clone();
        project.cover_image = draft_cover_image(draft);
        let updated = project.clone();

        self.repo.replace_all(&projects)?;
        Ok(updated)
    }

    /// Flips the favorite flag on the matching record only.
    pub fn toggle_favorite(&self, id: ProjectId) -> Result<Project, ProjectServiceError> {
        let mut projects = self.repo.load();
        let project = projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(ProjectServiceError::ProjectNotFound(id))?;

        project.toggle_favorite();
        let updated = project.clone();

        self.repo.replace_all(&projects)?;
        Ok(updated)
    }

    /// Removes the matching record.
    ///
    /// Deleting an id that is not present is a silent no-op success, matching
    /// the behavior callers already rely on with stale views.
    pub fn delete(&self, id: ProjectId) -> Result<(), ProjectServiceError> {
        let mut projects = self.repo.load();
        projects.retain(|project| project.id != id);
        self.repo.replace_all(&projects)?;
        Ok(())
    }
}

/// Checks the four required fields and reports the first empty one.
///
/// Empty means `""` exactly; whitespace-only input passes, matching the
/// original form's falsy check.
fn validate_draft(draft: &ProjectDraft) -> Result<(), ProjectServiceError> {
    let checks = [
        (DraftField::Name, draft.name.as_str()),
        (DraftField::Client, draft.client.as_str()),
        (DraftField::StartDate, draft.start_date.as_str()),
        (DraftField::EndDate, draft.end_date.as_str()),
    ];

    for (field, value) in checks {
        if value.is_empty() {
            return Err(ProjectServiceError::MissingRequiredField(field));
        }
    }

    Ok(())
}

fn draft_cover_image(draft: &ProjectDraft) -> String {
    draft
        .cover_image
        .clone()
        .unwrap_or_else(|| DEFAULT_COVER_IMAGE.to_string())
}

/// Assigns an id guaranteed distinct from every existing id.
///
/// Current epoch milliseconds, bumped past any collision. The only hard
/// contract is uniqueness within the set.
fn next_project_id(existing: &[Project]) -> ProjectId {
    let mut id = UNIX_EPOCH
        .elapsed()
        .map_or(0, |elapsed| elapsed.as_millis() as ProjectId);
    while existing.iter().any(|project| project.id == id) {
        id += 1;
    }
    id
}
