use serde::{Deserialize, Serialize};

use crate::{macros::object_id, OBJECT_ID_REGEX};

object_id!(
    /// Id of a newsletter email record.
    EmailId
);

/// A newsletter send attempt tracked by the backend.
///
/// Only the backend mutates these records; locally they are replaced as a
/// whole by the result of a retry or reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub id: EmailId,
    pub status: EmailStatus,
    /// Error detail reported by the backend for failed sends.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Draft,
    Pending,
    Submitting,
    Submitted,
    Failed,
}

impl EmailStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
