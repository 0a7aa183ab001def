use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::services::versioning::service::PromptVersioningService;
use crate::domain::prompts::version::PromptVersion;

pub struct ListVersions<'a> {
    pub versioning: &'a PromptVersioningService,
}

impl<'a> ListVersions<'a> {
    pub fn execute(&self, prompt_id: Uuid) -> Result<Vec<PromptVersion>, ServiceError> {
        self.versioning.list_versions(prompt_id)
    }
}
