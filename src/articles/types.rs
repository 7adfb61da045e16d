//! Article record types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::validation::NewArticle;

/// An article as the gateway assembles it on creation.
///
/// Serializes with the record store's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Assigned by the gateway, never by the client.
    pub id: Uuid,
    /// Any JSON value; stored exactly as the client sent it.
    #[serde(rename = "titulo")]
    pub title: Value,
    #[serde(rename = "contenido")]
    pub content: Value,
    /// `YYYY-MM-DD`, shape-checked only.
    #[serde(rename = "fechaAlta")]
    pub creation_date: String,
    /// Kept exactly as sent, not normalized through `Uuid`.
    #[serde(rename = "usuarioId")]
    pub owner_id: String,
}

impl Article {
    /// Assemble a record from validated fields and a fresh identifier.
    pub fn assemble(id: Uuid, fields: NewArticle) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            creation_date: fields.creation_date,
            owner_id: fields.owner_id,
        }
    }
}
