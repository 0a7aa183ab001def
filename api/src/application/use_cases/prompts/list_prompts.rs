use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::{PromptListFilter, PromptRepository};
use crate::domain::prompts::prompt::Prompt;

pub struct ListPrompts<'a, R: PromptRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PromptRepository + ?Sized> ListPrompts<'a, R> {
    pub fn execute(&self, filter: PromptListFilter) -> Result<Vec<Prompt>, ServiceError> {
        self.repo.list(&filter)
    }
}
