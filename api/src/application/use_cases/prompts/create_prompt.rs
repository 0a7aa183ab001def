use tracing::info;
use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::{PromptInsert, PromptRepository};
use crate::application::services::versioning::service::PromptVersioningService;
use crate::application::use_cases::prompts::validation::{
    validate_content, validate_description, validate_title,
};
use crate::domain::prompts::prompt::Prompt;

#[derive(Debug, Clone)]
pub struct PromptFields {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub collection_id: Option<Uuid>,
}

impl PromptFields {
    pub(crate) fn validate(&self) -> Result<(), ServiceError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        validate_description(self.description.as_deref())
    }
}

/// Stores a new prompt and records its content as version 1.
pub struct CreatePrompt<'a, R: PromptRepository + ?Sized> {
    pub repo: &'a R,
    pub versioning: &'a PromptVersioningService,
}

impl<'a, R: PromptRepository + ?Sized> CreatePrompt<'a, R> {
    pub fn execute(&self, fields: PromptFields) -> Result<Prompt, ServiceError> {
        fields.validate()?;
        let id = Uuid::new_v4();
        let (prompt, _) = self.versioning.create_prompt(id, || {
            self.repo.create(PromptInsert {
                id,
                title: &fields.title,
                content: &fields.content,
                description: fields.description.as_deref(),
                collection_id: fields.collection_id,
            })
        })?;
        info!(prompt_id = %prompt.id, "prompt_created");
        Ok(prompt)
    }
}
