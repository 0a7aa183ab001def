use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::PromptRepository;
use crate::application::services::versioning::service::PromptVersioningService;
use crate::application::use_cases::prompts::create_prompt::PromptFields;
use crate::application::use_cases::prompts::update_prompt::{PromptUpdateOutcome, UpdatePrompt};

/// Partial update. Nullable fields use `Some(None)` to clear a value and
/// `None` to leave it untouched.
#[derive(Debug, Clone, Default)]
pub struct PromptPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<Option<String>>,
    pub collection_id: Option<Option<Uuid>>,
}

impl PromptPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.description.is_none()
            && self.collection_id.is_none()
    }
}

pub struct PatchPrompt<'a, R: PromptRepository + ?Sized> {
    pub repo: &'a R,
    pub versioning: &'a PromptVersioningService,
}

impl<'a, R: PromptRepository + ?Sized> PatchPrompt<'a, R> {
    pub fn execute(
        &self,
        prompt_id: Uuid,
        patch: PromptPatch,
        change_summary: Option<&str>,
    ) -> Result<PromptUpdateOutcome, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::validation(
                "at least one field must be provided to update",
            ));
        }
        let existing = self
            .repo
            .get(prompt_id)?
            .ok_or_else(|| ServiceError::prompt_not_found(prompt_id))?;
        let fields = PromptFields {
            title: patch.title.unwrap_or(existing.title),
            content: patch.content.unwrap_or(existing.content),
            description: patch.description.unwrap_or(existing.description),
            collection_id: patch.collection_id.unwrap_or(existing.collection_id),
        };
        UpdatePrompt {
            repo: self.repo,
            versioning: self.versioning,
        }
        .execute(prompt_id, fields, change_summary)
    }
}
