use std::path::Path;

use anyhow::Result;

use folio_db::Database;
use folio_types::api::{InsertContactMessage, InsertProject, InsertUser};
use folio_types::models::{ContactMessage, Project, User};

use crate::Storage;

/// SQLite-backed store. Thin adapter over [`folio_db::Database`]; every
/// write is a single `INSERT ... RETURNING` statement.
pub struct DbStorage {
    db: Database,
}

impl DbStorage {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// In-memory SQLite instance, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }
}

impl Storage for DbStorage {
    fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.db.get_user(id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.db.get_user_by_username(username)
    }

    fn create_user(&self, data: InsertUser) -> Result<User> {
        self.db.create_user(data)
    }

    fn create_contact_message(&self, data: InsertContactMessage) -> Result<ContactMessage> {
        self.db.create_contact_message(data)
    }

    fn get_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        self.db.get_contact_messages()
    }

    fn create_project(&self, mut data: InsertProject) -> Result<Project> {
        // Treat empty URL strings the same as absent ones so the stored
        // record always carries an explicit null.
        data.project_url = data.project_url.filter(|u| !u.is_empty());
        data.github_url = data.github_url.filter(|u| !u.is_empty());
        self.db.create_project(data)
    }

    fn get_projects(&self) -> Result<Vec<Project>> {
        self.db.get_projects()
    }

    fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.db.get_project(id)
    }
}
