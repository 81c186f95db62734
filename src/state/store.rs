//! Project catalog persistence
//!
//! The catalog is a single JSON file under the user's data directory:
//! - Linux: ~/.local/share/pedreiro-portfolio/projects.json
//! - macOS: ~/Library/Application Support/pedreiro-portfolio/projects.json
//! - Windows: %APPDATA%\pedreiro-portfolio\projects.json
//!
//! The in-memory list is the source of truth; the file is a best-effort
//! mirror rewritten after every mutation. A failed write keeps the mutation
//! in memory and reports the error so the UI can warn about durability.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::data::{seed_projects, Category, Project, ProjectDraft};

/// A failed write of the catalog file.
///
/// When one of these comes back from a mutation, the in-memory list already
/// holds the change; only durability across restarts is at risk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not serialize the catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write the catalog to disk: {0}")]
    Write(#[from] std::io::Error),
}

/// Owns the full ordered project collection (newest first)
pub struct ProjectStore {
    projects: Vec<Project>,
    path: PathBuf,
}

impl ProjectStore {
    /// Load the catalog from the default location
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load the catalog from an explicit path.
    ///
    /// Missing and unparsable files both fall back to the built-in seed
    /// projects; neither is surfaced to the user. The two cases are only
    /// distinguishable in the log output.
    pub fn load_from(path: PathBuf) -> Self {
        let projects = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Vec<Project>>(&text) {
                Ok(projects) => {
                    println!(
                        "📁 Loaded {} projects from {}",
                        projects.len(),
                        path.display()
                    );
                    projects
                }
                Err(e) => {
                    eprintln!(
                        "⚠️  Catalog at {} is unreadable ({}), starting from seed projects",
                        path.display(),
                        e
                    );
                    seed_projects()
                }
            },
            Err(_) => {
                println!(
                    "📁 No catalog at {}, starting from seed projects",
                    path.display()
                );
                seed_projects()
            }
        };

        ProjectStore { projects, path }
    }

    /// Where the catalog file lives by default
    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("pedreiro-portfolio");
        path.push("projects.json");
        path
    }

    /// Every project, newest first
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    /// Projects matching `category`, newest first.
    /// `Category::All` matches everything.
    pub fn filter(&self, category: Category) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| category == Category::All || p.category == category)
            .collect()
    }

    /// Create a project from a draft: fresh id, current timestamp, prepended
    /// so listings stay newest-first.
    pub fn add(&mut self, draft: ProjectDraft) -> Result<Project, StoreError> {
        let project = Project {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            category: draft.category,
            before_image: draft.before_image,
            after_image: draft.after_image,
            created_at: Utc::now().timestamp_millis(),
        };

        self.projects.insert(0, project.clone());
        self.persist()?;
        Ok(project)
    }

    /// Replace the stored project with the same id.
    ///
    /// `created_at` is immutable after creation, so the stored timestamp is
    /// kept regardless of what the caller passes. Returns `false` (and
    /// touches nothing) when no project matches.
    pub fn edit(&mut self, updated: Project) -> Result<bool, StoreError> {
        match self.projects.iter_mut().find(|p| p.id == updated.id) {
            Some(slot) => {
                let created_at = slot.created_at;
                *slot = updated;
                slot.created_at = created_at;
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete the project with the given id.
    /// Unknown ids are a no-op returning `false`; no other record is touched.
    /// Callers must confirm with the user before calling this.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);

        if self.projects.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Rewrite the whole catalog file from the in-memory list
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.projects)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("path", &self.path)
            .field("projects", &self.projects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, ProjectStore) {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::load_from(dir.path().join("projects.json"));
        (dir, store)
    }

    fn draft(title: &str, category: Category) -> ProjectDraft {
        ProjectDraft {
            title: title.to_string(),
            category,
            before_image: "data:image/jpeg;base64,AAAA".to_string(),
            after_image: "data:image/jpeg;base64,BBBB".to_string(),
        }
    }

    #[test]
    fn missing_file_falls_back_to_seeds() {
        let (_dir, store) = temp_store();
        assert_eq!(store.all().len(), 3);
    }

    #[test]
    fn corrupt_file_falls_back_to_seeds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, "{{ this is not a catalog").unwrap();

        let store = ProjectStore::load_from(path);
        assert_eq!(store.all().len(), 3);
    }

    #[test]
    fn add_prepends_newest_first() {
        let (_dir, mut store) = temp_store();

        let added = store.add(draft("Guest bathroom", Category::Bathrooms)).unwrap();
        assert!(!added.id.is_empty());

        let all = store.filter(Category::All);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, added.id);
        assert_eq!(all[0].title, "Guest bathroom");
    }

    #[test]
    fn added_ids_are_unique() {
        let (_dir, mut store) = temp_store();

        let a = store.add(draft("One", Category::Painting)).unwrap();
        let b = store.add(draft("Two", Category::Painting)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn filter_returns_exact_category_matches() {
        let (_dir, store) = temp_store();

        let bathrooms = store.filter(Category::Bathrooms);
        assert_eq!(bathrooms.len(), 1);
        assert_eq!(bathrooms[0].category, Category::Bathrooms);

        assert!(store.filter(Category::Painting).is_empty());
        assert_eq!(store.filter(Category::All).len(), 3);
    }

    #[test]
    fn edit_preserves_id_and_created_at() {
        let (_dir, mut store) = temp_store();
        let original = store.all()[0].clone();

        let mut updated = original.clone();
        updated.title = "Renamed".to_string();
        updated.category = Category::Painting;
        updated.before_image = "data:image/jpeg;base64,CCCC".to_string();
        // A hostile caller cannot move the record in time either
        updated.created_at = 42;

        assert!(store.edit(updated).unwrap());

        let stored = &store.all()[0];
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.category, Category::Painting);
        assert_eq!(stored.before_image, "data:image/jpeg;base64,CCCC");
    }

    #[test]
    fn edit_unknown_id_is_a_noop() {
        let (_dir, mut store) = temp_store();
        let before = store.all().to_vec();

        let mut ghost = before[0].clone();
        ghost.id = "no-such-id".to_string();
        ghost.title = "Ghost".to_string();

        assert!(!store.edit(ghost).unwrap());
        assert_eq!(store.all(), &before[..]);
    }

    #[test]
    fn remove_deletes_exactly_one() {
        let (_dir, mut store) = temp_store();
        let id = store.all()[1].id.clone();

        assert!(store.remove(&id).unwrap());
        assert_eq!(store.all().len(), 2);
        assert!(store.all().iter().all(|p| p.id != id));
    }

    #[test]
    fn remove_unknown_id_loses_nothing() {
        let (_dir, mut store) = temp_store();

        assert!(!store.remove("no-such-id").unwrap());
        assert_eq!(store.all().len(), 3);
    }

    #[test]
    fn persisted_catalog_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.json");

        let mut store = ProjectStore::load_from(path.clone());
        store.add(draft("Hallway repaint", Category::Painting)).unwrap();
        let expected = store.all().to_vec();

        let reloaded = ProjectStore::load_from(path);
        assert_eq!(reloaded.all(), &expected[..]);
    }

    #[test]
    fn write_failure_keeps_the_mutation_in_memory() {
        // Parent "directory" is a plain file, so every persist fails
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("projects.json");

        let mut store = ProjectStore::load_from(path.clone());
        let result = store.add(draft("Doomed", Category::Kitchens));

        assert!(result.is_err());
        assert_eq!(store.all().len(), 4);
        assert_eq!(store.all()[0].title, "Doomed");

        // A fresh load sees none of it
        let reloaded = ProjectStore::load_from(path);
        assert_eq!(reloaded.all().len(), 3);
        assert!(reloaded.all().iter().all(|p| p.title != "Doomed"));
    }
}
