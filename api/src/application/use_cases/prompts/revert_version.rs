use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::PromptRepository;
use crate::application::services::versioning::service::PromptVersioningService;
use crate::domain::prompts::prompt::Prompt;
use crate::domain::prompts::version::PromptVersion;

pub struct RevertOutcome {
    pub prompt: Prompt,
    pub version: PromptVersion,
}

pub struct RevertVersion<'a, R: PromptRepository + ?Sized> {
    pub repo: &'a R,
    pub versioning: &'a PromptVersioningService,
}

impl<'a, R: PromptRepository + ?Sized> RevertVersion<'a, R> {
    pub fn execute(&self, prompt_id: Uuid, version_id: Uuid) -> Result<RevertOutcome, ServiceError> {
        let version = self.versioning.revert(prompt_id, version_id)?;
        let prompt = self
            .repo
            .get(prompt_id)?
            .ok_or_else(|| ServiceError::prompt_not_found(prompt_id))?;
        Ok(RevertOutcome { prompt, version })
    }
}
