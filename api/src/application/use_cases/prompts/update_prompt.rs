use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::{PromptDetails, PromptRepository};
use crate::application::services::versioning::service::PromptVersioningService;
use crate::application::use_cases::prompts::create_prompt::PromptFields;
use crate::domain::prompts::prompt::Prompt;
use crate::domain::prompts::version::PromptVersion;

pub struct PromptUpdateOutcome {
    pub prompt: Prompt,
    /// Set when the edit changed content and a version was recorded.
    pub version: Option<PromptVersion>,
}

/// Full replacement of a prompt's fields. Content goes through the
/// versioning service; the rest is written directly.
pub struct UpdatePrompt<'a, R: PromptRepository + ?Sized> {
    pub repo: &'a R,
    pub versioning: &'a PromptVersioningService,
}

impl<'a, R: PromptRepository + ?Sized> UpdatePrompt<'a, R> {
    pub fn execute(
        &self,
        prompt_id: Uuid,
        fields: PromptFields,
        change_summary: Option<&str>,
    ) -> Result<PromptUpdateOutcome, ServiceError> {
        fields.validate()?;
        if !self.repo.exists(prompt_id) {
            return Err(ServiceError::prompt_not_found(prompt_id));
        }
        let version = self
            .versioning
            .record_if_changed(prompt_id, &fields.content, change_summary)?;
        let prompt = self
            .repo
            .update_details(
                prompt_id,
                PromptDetails {
                    title: &fields.title,
                    description: fields.description.as_deref(),
                    collection_id: fields.collection_id,
                },
            )?
            .ok_or_else(|| ServiceError::prompt_not_found(prompt_id))?;
        Ok(PromptUpdateOutcome { prompt, version })
    }
}
