use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::services::versioning::service::PromptVersioningService;
use crate::domain::prompts::version::PromptVersion;

pub struct GetVersion<'a> {
    pub versioning: &'a PromptVersioningService,
}

impl<'a> GetVersion<'a> {
    pub fn execute(&self, prompt_id: Uuid, version_id: Uuid) -> Result<PromptVersion, ServiceError> {
        self.versioning.get_version(prompt_id, version_id)
    }
}
