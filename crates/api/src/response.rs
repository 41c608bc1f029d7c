//! Small acknowledgement bodies shared by handlers.
//!
//! Question payloads are returned bare (no `{ "data": ... }` envelope) so
//! the existing front-end can consume them directly.

use serde::Serialize;

/// `{ "message": "..." }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body for `DELETE /api/questions/{id}`. Deletes always succeed; `deleted`
/// says whether anything was actually removed.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: bool,
}
