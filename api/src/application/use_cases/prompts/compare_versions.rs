use uuid::Uuid;

use crate::application::dto::diff::VersionDiffResult;
use crate::application::errors::ServiceError;
use crate::application::services::versioning::service::PromptVersioningService;

pub struct CompareVersions<'a> {
    pub versioning: &'a PromptVersioningService,
}

impl<'a> CompareVersions<'a> {
    /// Diffs `compare_to` (side A) against `version_id` (side B). Without
    /// `compare_to`, side A is the version before `version_id`.
    pub fn execute(
        &self,
        prompt_id: Uuid,
        version_id: Uuid,
        compare_to: Option<Uuid>,
    ) -> Result<VersionDiffResult, ServiceError> {
        match compare_to {
            Some(base_id) => self.versioning.compare(prompt_id, base_id, version_id),
            None => self.versioning.compare_with_previous(prompt_id, version_id),
        }
    }
}
