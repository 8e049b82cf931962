use uuid::Uuid;

/// Field changes for an existing message. `None` keeps the stored value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessagePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<Uuid>,
}
