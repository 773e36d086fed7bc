use crate::error::{Result, StoreError};
use crate::repo::users::user_from_row;
use callbook_core::domain::{User, UserId};
use rusqlite::{params, Connection};

/// The single logged-in user. Call records are always attributed to it.
pub struct SessionRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SessionRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn login(&self, now_utc: i64, user_id: UserId) -> Result<User> {
        let tx = self.conn.unchecked_transaction()?;
        let user = crate::repo::users::get_inner(&tx, user_id)?
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;
        tx.execute(
            "INSERT INTO session (singleton, user_id, logged_in_at) VALUES (1, ?1, ?2)
             ON CONFLICT (singleton) DO UPDATE
             SET user_id = excluded.user_id, logged_in_at = excluded.logged_in_at;",
            params![user_id.to_string(), now_utc],
        )?;
        tx.commit()?;
        Ok(user)
    }

    /// Returns whether a session existed.
    pub fn logout(&self) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM session;", [])?;
        Ok(removed > 0)
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        current_user_inner(self.conn)
    }

    pub fn require_user(&self) -> Result<User> {
        self.current_user()?.ok_or(StoreError::NotAuthenticated)
    }
}

pub(crate) fn current_user_inner(conn: &Connection) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.name, u.created_at
         FROM session s
         INNER JOIN users u ON u.id = s.user_id
         WHERE s.singleton = 1;",
    )?;
    let mut rows = stmt.query([])?;
    if let Some(row) = rows.next()? {
        Ok(Some(user_from_row(row)?))
    } else {
        Ok(None)
    }
}
