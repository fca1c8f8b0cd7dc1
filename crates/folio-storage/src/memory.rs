use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use chrono::Utc;

use folio_types::api::{InsertContactMessage, InsertProject, InsertUser};
use folio_types::models::{ContactMessage, Project, User};

use crate::Storage;

/// Process-local store used for tests and as a fallback when no database
/// is configured. Nothing survives a restart.
pub struct MemStorage {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    projects: HashMap<i64, Project>,
    messages: HashMap<i64, ContactMessage>,
    next_user_id: i64,
    next_project_id: i64,
    next_message_id: i64,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    fn with_inner<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Inner) -> T,
    {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        Ok(f(&mut inner))
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemStorage {
    fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.with_inner(|inner| inner.users.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_inner(|inner| {
            inner
                .users
                .values()
                .find(|u| u.username == username)
                .cloned()
        })
    }

    fn create_user(&self, data: InsertUser) -> Result<User> {
        self.with_inner(|inner| {
            inner.next_user_id += 1;
            let user = User {
                id: inner.next_user_id,
                username: data.username,
                password: data.password,
            };
            inner.users.insert(user.id, user.clone());
            user
        })
    }

    fn create_contact_message(&self, data: InsertContactMessage) -> Result<ContactMessage> {
        self.with_inner(|inner| {
            inner.next_message_id += 1;
            let message = ContactMessage {
                id: inner.next_message_id,
                name: data.name,
                email: data.email,
                subject: data.subject,
                message: data.message,
                created_at: Utc::now(),
                read: false,
            };
            inner.messages.insert(message.id, message.clone());
            message
        })
    }

    fn get_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        self.with_inner(|inner| {
            let mut messages: Vec<_> = inner.messages.values().cloned().collect();
            // Ids are assigned in insertion order, so they double as the
            // tie-break for identical timestamps.
            messages.sort_by_key(|m| (m.created_at, m.id));
            messages
        })
    }

    fn create_project(&self, data: InsertProject) -> Result<Project> {
        self.with_inner(|inner| {
            inner.next_project_id += 1;
            let project = Project {
                id: inner.next_project_id,
                title: data.title,
                description: data.description,
                tags: data.tags,
                image_url: data.image_url,
                project_url: data.project_url.filter(|u| !u.is_empty()),
                github_url: data.github_url.filter(|u| !u.is_empty()),
                created_at: Utc::now(),
            };
            inner.projects.insert(project.id, project.clone());
            project
        })
    }

    fn get_projects(&self) -> Result<Vec<Project>> {
        self.with_inner(|inner| {
            let mut projects: Vec<_> = inner.projects.values().cloned().collect();
            projects.sort_by_key(|p| (p.created_at, p.id));
            projects
        })
    }

    fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.with_inner(|inner| inner.projects.get(&id).cloned())
    }
}
