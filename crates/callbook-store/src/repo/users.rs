use crate::error::{Result, StoreError};
use callbook_core::domain::{User, UserId};
use rusqlite::{params, Connection};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct UserNew {
    pub name: String,
}

pub struct UsersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UsersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: UserNew) -> Result<User> {
        let user = User {
            id: UserId::new(),
            name: input.name.trim().to_string(),
            created_at: now_utc,
        };
        user.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        if get_by_name_inner(&tx, &user.name)?.is_some() {
            return Err(StoreError::DuplicateUser(user.name));
        }
        tx.execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3);",
            params![user.id.to_string(), user.name, user.created_at],
        )?;
        tx.commit()?;
        Ok(user)
    }

    /// Case-insensitive lookup by display name.
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>> {
        get_by_name_inner(self.conn, name)
    }

    pub fn list(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at FROM users ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(user_from_row(row)?);
        }
        Ok(users)
    }
}

pub(crate) fn get_inner(conn: &Connection, id: UserId) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM users WHERE id = ?1;")?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(user_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn get_by_name_inner(conn: &Connection, name: &str) -> Result<Option<User>> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let mut stmt = conn.prepare(
        "SELECT id, name, created_at FROM users WHERE name = ?1 COLLATE NOCASE;",
    )?;
    let mut rows = stmt.query([trimmed])?;
    if let Some(row) = rows.next()? {
        Ok(Some(user_from_row(row)?))
    } else {
        Ok(None)
    }
}

pub(crate) fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User> {
    let id_str: String = row.get(0)?;
    let id = UserId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(User {
        id,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}
