//! Project record model.
//!
//! # Responsibility
//! - Define the sole persisted entity and its wire (JSON) shape.
//! - Provide the cover-image sentinel substituted when no image was supplied.
//!
//! # Invariants
//! - `id` is unique across the persisted set and never reassigned.
//! - `is_favorite` changes only through the dedicated toggle command.
//! - A blob that does not match this shape is treated as corrupt by the
//!   repository and degrades to an empty set on load.

use serde::{Deserialize, Serialize};

/// Stable identifier for a project record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProjectId = i64;

/// Cover image substituted when the user saved a project without one.
pub const DEFAULT_COVER_IMAGE: &str = "Image.png";

/// Canonical record for one tracked project.
///
/// Serialized field names match the persisted slot blob exactly: camelCase
/// keys, integer `id`, string dates, `coverImage` omitted-or-string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique id assigned at creation, immutable thereafter.
    pub id: ProjectId,
    /// Project display name. Required non-empty at save time.
    pub name: String,
    /// Client the project is delivered for. Required non-empty at save time.
    pub client: String,
    /// ISO 8601 calendar date. No ordering constraint against `end_date`.
    pub start_date: String,
    /// ISO 8601 calendar date.
    pub end_date: String,
    /// Starts `false` on creation; flipped only by the toggle command.
    pub is_favorite: bool,
    /// Opaque encoded image string, or [`DEFAULT_COVER_IMAGE`] when absent.
    #[serde(default = "default_cover_image")]
    pub cover_image: String,
}

fn default_cover_image() -> String {
    DEFAULT_COVER_IMAGE.to_string()
}

impl Project {
    /// Returns whether this record matches a case-insensitive name search.
    pub fn name_matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    /// Flips the favorite flag in place.
    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, DEFAULT_COVER_IMAGE};

    fn sample() -> Project {
        Project {
            id: 1700000000000,
            name: "Site".to_string(),
            client: "Acme".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-06-01".to_string(),
            is_favorite: false,
            cover_image: DEFAULT_COVER_IMAGE.to_string(),
        }
    }

    #[test]
    fn serializes_to_camel_case_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], 1700000000000_i64);
        assert_eq!(value["startDate"], "2024-01-01");
        assert_eq!(value["endDate"], "2024-06-01");
        assert_eq!(value["isFavorite"], false);
        assert_eq!(value["coverImage"], DEFAULT_COVER_IMAGE);
    }

    #[test]
    fn missing_cover_image_deserializes_to_sentinel() {
        let json = r#"{
            "id": 7,
            "name": "Site",
            "client": "Acme",
            "startDate": "2024-01-01",
            "endDate": "2024-06-01",
            "isFavorite": true
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.cover_image, DEFAULT_COVER_IMAGE);
        assert!(project.is_favorite);
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let json = r#"{"id": 7, "name": "Site"}"#;
        assert!(serde_json::from_str::<Project>(json).is_err());
    }

    #[test]
    fn name_matches_is_case_insensitive() {
        let project = sample();
        assert!(project.name_matches("sIt"));
        assert!(!project.name_matches("portal"));
    }

    #[test]
    fn toggle_favorite_flips_only_the_flag() {
        let mut project = sample();
        project.toggle_favorite();
        assert!(project.is_favorite);
        project.toggle_favorite();
        assert_eq!(project, sample());
    }
}
