use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::PromptRepository;
use crate::domain::prompts::prompt::Prompt;

pub struct GetPrompt<'a, R: PromptRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PromptRepository + ?Sized> GetPrompt<'a, R> {
    pub fn execute(&self, prompt_id: Uuid) -> Result<Prompt, ServiceError> {
        self.repo
            .get(prompt_id)?
            .ok_or_else(|| ServiceError::prompt_not_found(prompt_id))
    }
}
