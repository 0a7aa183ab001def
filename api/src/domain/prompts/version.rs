use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A recorded state of a prompt's content.
///
/// Versions are immutable once created: fields are only readable through
/// accessors and the store hands out clones, never references into its log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVersion {
    id: Uuid,
    prompt_id: Uuid,
    version_number: i64,
    content: String,
    created_at: DateTime<Utc>,
    change_summary: Option<String>,
}

impl PromptVersion {
    pub(crate) fn new(
        id: Uuid,
        prompt_id: Uuid,
        version_number: i64,
        content: String,
        created_at: DateTime<Utc>,
        change_summary: Option<String>,
    ) -> Self {
        Self {
            id,
            prompt_id,
            version_number,
            content,
            created_at,
            change_summary,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn prompt_id(&self) -> Uuid {
        self.prompt_id
    }

    /// 1-based position in the prompt's history.
    pub fn version_number(&self) -> i64 {
        self.version_number
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn change_summary(&self) -> Option<&str> {
        self.change_summary.as_deref()
    }
}
