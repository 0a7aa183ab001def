use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::domain::prompts::prompt::Prompt;

#[derive(Debug, Clone)]
pub struct PromptInsert<'a> {
    /// Chosen by the caller so the prompt can be locked before it exists.
    pub id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub description: Option<&'a str>,
    pub collection_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct PromptDetails<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub collection_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct PromptListFilter {
    pub collection_id: Option<Uuid>,
    pub search: Option<String>,
}

/// Live-content contract the versioning service relies on.
pub trait PromptContentPort: Send + Sync {
    fn get_live_content(&self, prompt_id: Uuid) -> Result<String, ServiceError>;

    fn set_live_content(&self, prompt_id: Uuid, content: &str) -> Result<(), ServiceError>;

    fn exists(&self, prompt_id: Uuid) -> bool;
}

pub trait PromptRepository: PromptContentPort {
    /// Fails with a validation error when `input.id` is already taken.
    fn create(&self, input: PromptInsert<'_>) -> Result<Prompt, ServiceError>;

    fn get(&self, prompt_id: Uuid) -> Result<Option<Prompt>, ServiceError>;

    /// Matching prompts, newest `created_at` first.
    fn list(&self, filter: &PromptListFilter) -> Result<Vec<Prompt>, ServiceError>;

    /// Replaces everything except content, which only changes through
    /// `set_live_content`.
    fn update_details(
        &self,
        prompt_id: Uuid,
        details: PromptDetails<'_>,
    ) -> Result<Option<Prompt>, ServiceError>;

    fn delete(&self, prompt_id: Uuid) -> Result<bool, ServiceError>;
}
