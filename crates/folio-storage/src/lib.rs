pub mod db;
pub mod memory;

use std::sync::Arc;

use anyhow::Result;

use folio_types::api::{InsertContactMessage, InsertProject, InsertUser};
use folio_types::models::{ContactMessage, Project, User};

pub use db::DbStorage;
pub use memory::MemStorage;

/// Persistence contract shared by the database-backed store and the
/// in-memory fallback. Absence is `Ok(None)`, never an error; callers
/// decide whether a missing record is worth a 404.
///
/// Methods are synchronous: the SQLite backend blocks on a connection
/// mutex, so HTTP handlers run these under `spawn_blocking`.
pub trait Storage: Send + Sync {
    fn get_user(&self, id: i64) -> Result<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    fn create_user(&self, data: InsertUser) -> Result<User>;

    fn create_contact_message(&self, data: InsertContactMessage) -> Result<ContactMessage>;
    /// All messages, ascending by creation time.
    fn get_contact_messages(&self) -> Result<Vec<ContactMessage>>;

    fn create_project(&self, data: InsertProject) -> Result<Project>;
    /// All projects, ascending by creation time.
    fn get_projects(&self) -> Result<Vec<Project>>;
    fn get_project(&self, id: i64) -> Result<Option<Project>>;
}

pub type SharedStorage = Arc<dyn Storage>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project(title: &str) -> InsertProject {
        InsertProject {
            title: title.to_string(),
            description: "A thing I built".to_string(),
            tags: vec!["rust".to_string(), "axum".to_string()],
            image_url: "/images/thing.png".to_string(),
            project_url: None,
            github_url: Some(String::new()),
        }
    }

    fn sample_message(name: &str) -> InsertContactMessage {
        InsertContactMessage {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            subject: "Hi".to_string(),
            message: "Hello there".to_string(),
        }
    }

    fn check_project_roundtrip(store: &dyn Storage) {
        let created = store.create_project(sample_project("Tracker")).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.title, "Tracker");
        assert_eq!(created.tags, vec!["rust", "axum"]);
        // Absent and empty optional URLs both come back as explicit None.
        assert_eq!(created.project_url, None);
        assert_eq!(created.github_url, None);

        let fetched = store.get_project(created.id).unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, created.title);
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.tags, created.tags);
        assert_eq!(fetched.image_url, created.image_url);
        assert_eq!(fetched.project_url, None);
        assert_eq!(fetched.github_url, None);
    }

    fn check_project_listing(store: &dyn Storage) {
        for title in ["First", "Second", "Third"] {
            store.create_project(sample_project(title)).unwrap();
        }

        let projects = store.get_projects().unwrap();
        assert_eq!(projects.len(), 3);
        assert_eq!(
            projects.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            vec!["First", "Second", "Third"]
        );
        for pair in projects.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
            assert_ne!(pair[0].id, pair[1].id);
        }
    }

    fn check_missing_project(store: &dyn Storage) {
        assert!(store.get_project(9999).unwrap().is_none());
    }

    fn check_contact_messages(store: &dyn Storage) {
        let created = store.create_contact_message(sample_message("Ada")).unwrap();
        assert!(!created.read);

        store.create_contact_message(sample_message("Brian")).unwrap();

        let messages = store.get_contact_messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].name, "Ada");
        assert_eq!(messages[1].name, "Brian");
        assert!(messages[0].created_at <= messages[1].created_at);
    }

    fn check_users(store: &dyn Storage) {
        let created = store
            .create_user(InsertUser {
                username: "admin".to_string(),
                password: "hunter2".to_string(),
            })
            .unwrap();
        assert!(created.id > 0);

        let by_id = store.get_user(created.id).unwrap().unwrap();
        assert_eq!(by_id.username, "admin");

        let by_name = store.get_user_by_username("admin").unwrap().unwrap();
        assert_eq!(by_name.id, created.id);

        assert!(store.get_user_by_username("nobody").unwrap().is_none());
        assert!(store.get_user(created.id + 1).unwrap().is_none());
    }

    fn run_suite(store: &dyn Storage) {
        check_project_roundtrip(store);
        check_missing_project(store);
        check_contact_messages(store);
        check_users(store);
    }

    #[test]
    fn memory_storage_behaviour() {
        run_suite(&MemStorage::new());
        check_project_listing(&MemStorage::new());
    }

    #[test]
    fn sqlite_storage_behaviour() {
        run_suite(&DbStorage::open_in_memory().unwrap());
        check_project_listing(&DbStorage::open_in_memory().unwrap());
    }

    #[test]
    fn sqlite_rejects_duplicate_usernames() {
        let store = DbStorage::open_in_memory().unwrap();
        let insert = || InsertUser {
            username: "solo".to_string(),
            password: "pw".to_string(),
        };
        store.create_user(insert()).unwrap();
        assert!(store.create_user(insert()).is_err());
    }
}
