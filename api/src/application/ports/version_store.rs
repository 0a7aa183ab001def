use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::domain::prompts::version::PromptVersion;

#[derive(Debug, Clone)]
pub struct VersionAppend<'a> {
    pub prompt_id: &'a Uuid,
    pub content: &'a str,
    pub change_summary: Option<&'a str>,
}

/// Append-only history of prompt content.
///
/// Implementations allocate version numbers themselves and must do so
/// atomically per prompt: concurrent appends for one prompt never share a
/// number and never leave a gap.
pub trait VersionStore: Send + Sync {
    fn append(&self, input: VersionAppend<'_>) -> Result<PromptVersion, ServiceError>;

    /// Newest first. Unknown prompts yield an empty list.
    fn list(&self, prompt_id: Uuid) -> Result<Vec<PromptVersion>, ServiceError>;

    /// Lookup is scoped by prompt; an id that belongs to another prompt is
    /// reported as not found.
    fn get(&self, prompt_id: Uuid, version_id: Uuid) -> Result<PromptVersion, ServiceError>;

    /// Highest-numbered version strictly below `version_number`.
    fn latest_before(
        &self,
        prompt_id: Uuid,
        version_number: i64,
    ) -> Result<Option<PromptVersion>, ServiceError>;

    /// Drops the prompt's whole history. Purging an empty history is a no-op.
    fn purge(&self, prompt_id: Uuid) -> Result<(), ServiceError>;
}
