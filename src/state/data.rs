//! Shared data structures for the portfolio catalog
//!
//! These types flow between the persistence layer and the UI layer.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::ingest::pipeline;

/// Fixed admin credentials for the panel gate.
/// Compared in plain text on the client; this is a convenience gate,
/// not a security boundary.
pub const ADMIN_USER: &str = "PO2026";
pub const ADMIN_PASS: &str = "pedreirooficial";

/// The fixed set of project categories.
///
/// `All` is a filter-only sentinel: the home screen offers it to show every
/// project, but no stored record ever carries it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    All,
    Bathrooms,
    Kitchens,
    Floors,
    Painting,
}

impl Category {
    /// Every category, in filter-bar order
    pub const FILTERS: [Category; 5] = [
        Category::All,
        Category::Bathrooms,
        Category::Kitchens,
        Category::Floors,
        Category::Painting,
    ];

    /// Categories a record may actually carry (everything but `All`)
    pub const STORABLE: [Category; 4] = [
        Category::Bathrooms,
        Category::Kitchens,
        Category::Floors,
        Category::Painting,
    ];
}

impl Default for Category {
    /// First storable category; what a fresh project form starts on
    fn default() -> Self {
        Category::Bathrooms
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::All => "All",
            Category::Bathrooms => "Bathrooms",
            Category::Kitchens => "Kitchens",
            Category::Floors => "Floors",
            Category::Painting => "Painting",
        })
    }
}

/// One portfolio entry: a titled before/after pair
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable unique id, assigned once at creation
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Compressed "before" shot as an inline `data:image/jpeg;base64,…` URL
    pub before_image: String,
    /// Compressed "after" shot, same representation
    pub after_image: String,
    /// Unix millis at creation; the sole sort key (newest first), never changes
    pub created_at: i64,
}

/// Everything the user supplies for a new project.
/// The store assigns the id and the timestamp.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub category: Category,
    pub before_image: String,
    pub after_image: String,
}

/// Built-in example projects, shown whenever nothing usable is persisted.
///
/// The images are small solid-colour JPEGs produced by the same encoder the
/// ingestion pipeline uses, so the seeds render without any network access.
pub fn seed_projects() -> Vec<Project> {
    let now = Utc::now().timestamp_millis();

    vec![
        Project {
            id: "1".to_string(),
            title: "Luxury bathroom remodel".to_string(),
            category: Category::Bathrooms,
            before_image: pipeline::placeholder_data_url(0x6b, 0x72, 0x80),
            after_image: pipeline::placeholder_data_url(0xa5, 0xc8, 0xd4),
            created_at: now - 100_000,
        },
        Project {
            id: "2".to_string(),
            title: "Modern open-plan kitchen".to_string(),
            category: Category::Kitchens,
            before_image: pipeline::placeholder_data_url(0x8a, 0x6f, 0x55),
            after_image: pipeline::placeholder_data_url(0xe8, 0xd9, 0xb5),
            created_at: now - 200_000,
        },
        Project {
            id: "3".to_string(),
            title: "Laminate flooring, integrated living room".to_string(),
            category: Category::Floors,
            before_image: pipeline::placeholder_data_url(0x55, 0x50, 0x48),
            after_image: pipeline::placeholder_data_url(0xc9, 0xa8, 0x7c),
            created_at: now - 300_000,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels() {
        assert_eq!(Category::All.to_string(), "All");
        assert_eq!(Category::Painting.to_string(), "Painting");
    }

    #[test]
    fn category_serde_round_trip() {
        let json = serde_json::to_string(&Category::Bathrooms).unwrap();
        assert_eq!(json, "\"Bathrooms\"");

        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Bathrooms);
    }

    #[test]
    fn project_serializes_with_camel_case_keys() {
        let project = seed_projects().remove(0);
        let json = serde_json::to_string(&project).unwrap();

        assert!(json.contains("\"beforeImage\""));
        assert!(json.contains("\"afterImage\""));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn seeds_are_three_distinct_renderable_projects() {
        let seeds = seed_projects();
        assert_eq!(seeds.len(), 3);

        let categories: Vec<Category> = seeds.iter().map(|p| p.category).collect();
        assert_eq!(
            categories,
            vec![Category::Bathrooms, Category::Kitchens, Category::Floors]
        );

        for project in &seeds {
            assert!(pipeline::data_url_bytes(&project.before_image).is_some());
            assert!(pipeline::data_url_bytes(&project.after_image).is_some());
        }

        // Newest first, like every listing in the app
        assert!(seeds[0].created_at > seeds[1].created_at);
        assert!(seeds[1].created_at > seeds[2].created_at);
    }
}
