use crate::Database;
use anyhow::Result;
use chrono::{DateTime, Utc};
use folio_types::api::{InsertContactMessage, InsertProject, InsertUser};
use folio_types::models::{ContactMessage, Project, User};
use rusqlite::{Connection, Row};

impl Database {
    // -- Users --

    pub fn create_user(&self, data: InsertUser) -> Result<User> {
        self.with_conn(|conn| {
            let id: i64 = conn.query_row(
                "INSERT INTO users (username, password) VALUES (?1, ?2) RETURNING id",
                (&data.username, &data.password),
                |row| row.get(0),
            )?;
            Ok(User {
                id,
                username: data.username,
                password: data.password,
            })
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Projects --

    pub fn create_project(&self, data: InsertProject) -> Result<Project> {
        let created_at = Utc::now();
        let tags_json = serde_json::to_string(&data.tags)?;

        self.with_conn(|conn| {
            let id: i64 = conn.query_row(
                "INSERT INTO projects
                     (title, description, tags, image_url, project_url, github_url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING id",
                rusqlite::params![
                    data.title,
                    data.description,
                    tags_json,
                    data.image_url,
                    data.project_url,
                    data.github_url,
                    created_at,
                ],
                |row| row.get(0),
            )?;

            Ok(Project {
                id,
                title: data.title,
                description: data.description,
                tags: data.tags,
                image_url: data.image_url,
                project_url: data.project_url,
                github_url: data.github_url,
                created_at,
            })
        })
    }

    pub fn get_projects(&self) -> Result<Vec<Project>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, description, tags, image_url, project_url, github_url, created_at
                 FROM projects
                 ORDER BY created_at ASC, id ASC",
            )?;

            let rows = stmt
                .query_map([], project_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, description, tags, image_url, project_url, github_url, created_at
                 FROM projects
                 WHERE id = ?1",
            )?;

            let row = stmt.query_row([id], project_from_row).optional()?;
            Ok(row)
        })
    }

    // -- Contact messages --

    pub fn create_contact_message(&self, data: InsertContactMessage) -> Result<ContactMessage> {
        let created_at = Utc::now();

        self.with_conn(|conn| {
            let id: i64 = conn.query_row(
                "INSERT INTO contact_messages (name, email, subject, message, read, created_at)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5)
                 RETURNING id",
                rusqlite::params![data.name, data.email, data.subject, data.message, created_at],
                |row| row.get(0),
            )?;

            Ok(ContactMessage {
                id,
                name: data.name,
                email: data.email,
                subject: data.subject,
                message: data.message,
                created_at,
                read: false,
            })
        })
    }

    pub fn get_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, subject, message, read, created_at
                 FROM contact_messages
                 ORDER BY created_at ASC, id ASC",
            )?;

            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, username, password FROM users WHERE id = ?1")?;

    let row = stmt.query_row([id], user_from_row).optional()?;
    Ok(row)
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, username, password FROM users WHERE username = ?1")?;

    let row = stmt.query_row([username], user_from_row).optional()?;
    Ok(row)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    // Tags are stored as a JSON array in a text column (SQLite has no
    // native array type).
    let tags_json: String = row.get(3)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        tags,
        image_url: row.get(4)?,
        project_url: row.get(5)?,
        github_url: row.get(6)?,
        created_at: row.get::<_, DateTime<Utc>>(7)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        read: row.get(5)?,
        created_at: row.get::<_, DateTime<Utc>>(6)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
