use std::collections::HashMap;

use board_types::models::{Message, User};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;
use uuid::Uuid;

use crate::models::MessagePatch;
use crate::{Database, Result, StorageError};

impl Database {
    // -- Users --

    pub fn create_user(&self, id: Uuid, username: &str, password_hash: &str) -> Result<User> {
        self.with_tx(|tx| {
            let taken: Option<String> = tx
                .query_row("SELECT id FROM users WHERE username = ?1", [username], |row| {
                    row.get(0)
                })
                .optional()?;
            if taken.is_some() {
                return Err(StorageError::UsernameTaken(username.to_string()));
            }

            tx.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id.to_string(), username, password_hash),
            )?;

            Ok(User {
                id,
                username: username.to_string(),
                messages: vec![],
            })
        })
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, username FROM users ORDER BY rowid")?;
            let mut users = stmt
                .query_map([], |row| {
                    Ok(User {
                        id: uuid_at(row, 0)?,
                        username: row.get(1)?,
                        messages: vec![],
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            // One pass over all back-references instead of a query per user
            let mut stmt =
                conn.prepare("SELECT user_id, message_id FROM user_messages ORDER BY seq DESC")?;
            let mut refs: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
            let pairs = stmt
                .query_map([], |row| Ok((uuid_at(row, 0)?, uuid_at(row, 1)?)))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            for (user_id, message_id) in pairs {
                refs.entry(user_id).or_default().push(message_id);
            }

            for user in &mut users {
                user.messages = refs.remove(&user.id).unwrap_or_default();
            }
            Ok(users)
        })
    }

    /// The user whose message list holds `message_id`, if any.
    pub fn find_user_by_message(&self, message_id: Uuid) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let owner = conn
                .query_row(
                    "SELECT user_id FROM user_messages WHERE message_id = ?1",
                    [message_id.to_string()],
                    |row| uuid_at(row, 0),
                )
                .optional()?;

            match owner {
                Some(user_id) => query_user(conn, user_id),
                None => Ok(None),
            }
        })
    }

    // -- Messages --

    pub fn list_messages(&self) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, title, body, author_id FROM messages ORDER BY rowid")?;
            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_message(&self, id: Uuid) -> Result<Option<Message>> {
        self.with_conn(|conn| query_message(conn, id))
    }

    /// Insert a message and prepend it to its author's list in one transaction.
    /// An unknown author aborts the whole thing, leaving no orphaned message.
    pub fn create_message(&self, id: Uuid, title: &str, body: &str, author: Uuid) -> Result<Message> {
        self.with_tx(|tx| {
            ensure_user_exists(tx, author)?;

            tx.execute(
                "INSERT INTO messages (id, title, body, author_id) VALUES (?1, ?2, ?3, ?4)",
                (id.to_string(), title, body, author.to_string()),
            )?;
            prepend_reference(tx, author, id)?;

            debug!("Message {} created for user {}", id, author);
            Ok(Message {
                id,
                title: title.to_string(),
                body: body.to_string(),
                author,
            })
        })
    }

    /// Apply `patch` and return the message as stored afterwards, or `None`
    /// when no message has this id. Changing the author moves the reference
    /// to the front of the new author's list.
    pub fn update_message(&self, id: Uuid, patch: &MessagePatch) -> Result<Option<Message>> {
        self.with_tx(|tx| {
            let Some(current) = query_message(tx, id)? else {
                return Ok(None);
            };

            if let Some(author) = patch.author.filter(|a| *a != current.author) {
                ensure_user_exists(tx, author)?;
                remove_reference(tx, id)?;
                prepend_reference(tx, author, id)?;
                debug!("Message {} moved from user {} to {}", id, current.author, author);
            }

            tx.execute(
                "UPDATE messages
                 SET title = COALESCE(?2, title),
                     body = COALESCE(?3, body),
                     author_id = COALESCE(?4, author_id)
                 WHERE id = ?1",
                (
                    id.to_string(),
                    patch.title.as_deref(),
                    patch.body.as_deref(),
                    patch.author.map(|a| a.to_string()),
                ),
            )?;

            // Re-read so the caller sees the stored record, not the old one
            query_message(tx, id)
        })
    }

    /// Delete a message and its entry in the owner's list. Returns false if
    /// nothing had this id.
    pub fn delete_message(&self, id: Uuid) -> Result<bool> {
        self.with_tx(|tx| {
            remove_reference(tx, id)?;
            let deleted = tx.execute("DELETE FROM messages WHERE id = ?1", [id.to_string()])?;
            Ok(deleted > 0)
        })
    }

    pub fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(())
        })
    }
}

fn query_user(conn: &Connection, id: Uuid) -> Result<Option<User>> {
    let username: Option<String> = conn
        .query_row("SELECT username FROM users WHERE id = ?1", [id.to_string()], |row| {
            row.get(0)
        })
        .optional()?;

    let Some(username) = username else {
        return Ok(None);
    };

    Ok(Some(User {
        id,
        username,
        messages: message_refs(conn, id)?,
    }))
}

fn message_refs(conn: &Connection, user_id: Uuid) -> Result<Vec<Uuid>> {
    let mut stmt = conn
        .prepare("SELECT message_id FROM user_messages WHERE user_id = ?1 ORDER BY seq DESC")?;
    let refs = stmt
        .query_map([user_id.to_string()], |row| uuid_at(row, 0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(refs)
}

fn query_message(conn: &Connection, id: Uuid) -> Result<Option<Message>> {
    let mut stmt =
        conn.prepare("SELECT id, title, body, author_id FROM messages WHERE id = ?1")?;
    let row = stmt.query_row([id.to_string()], message_from_row).optional()?;
    Ok(row)
}

fn ensure_user_exists(conn: &Connection, id: Uuid) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        [id.to_string()],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(StorageError::AuthorNotFound(id))
    }
}

/// Single-statement list prepend: the highest `seq` sorts first.
fn prepend_reference(conn: &Connection, user_id: Uuid, message_id: Uuid) -> Result<()> {
    conn.execute(
        "INSERT INTO user_messages (message_id, user_id, seq)
         VALUES (?1, ?2, (SELECT COALESCE(MAX(seq), 0) + 1 FROM user_messages))",
        (message_id.to_string(), user_id.to_string()),
    )?;
    Ok(())
}

fn remove_reference(conn: &Connection, message_id: Uuid) -> Result<()> {
    conn.execute(
        "DELETE FROM user_messages WHERE message_id = ?1",
        [message_id.to_string()],
    )?;
    Ok(())
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: uuid_at(row, 0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        author: uuid_at(row, 3)?,
    })
}

/// Ids are stored as hyphenated TEXT.
fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
