use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered board user. The password hash never leaves the db crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    /// Ids of messages authored by this user, most recent first.
    pub messages: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: Uuid,
}
