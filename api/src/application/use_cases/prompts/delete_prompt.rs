use tracing::info;
use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::PromptRepository;
use crate::application::services::versioning::service::PromptVersioningService;

/// Removes a prompt together with its whole version history.
pub struct DeletePrompt<'a, R: PromptRepository + ?Sized> {
    pub repo: &'a R,
    pub versioning: &'a PromptVersioningService,
}

impl<'a, R: PromptRepository + ?Sized> DeletePrompt<'a, R> {
    pub fn execute(&self, prompt_id: Uuid) -> Result<(), ServiceError> {
        let removed = self
            .versioning
            .delete_prompt(prompt_id, || self.repo.delete(prompt_id))?;
        if !removed {
            return Err(ServiceError::prompt_not_found(prompt_id));
        }
        info!(prompt_id = %prompt_id, "prompt_deleted");
        Ok(())
    }
}
