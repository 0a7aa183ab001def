use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::application::dto::diff::VersionDiffResult;
use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::PromptContentPort;
use crate::application::ports::version_store::{VersionAppend, VersionStore};
use crate::application::services::diff::text_diff::compute_text_diff;
use crate::application::services::versioning::locks::PromptLocks;
use crate::domain::prompts::version::PromptVersion;

pub const INITIAL_VERSION_SUMMARY: &str = "Initial version";

/// Policy layer over the version store: snapshot on change, revert as a new
/// version, and diffs between versions.
///
/// Every operation that reads live content and then appends (or appends and
/// then writes live content) runs under the prompt's lock, so the newest
/// version always matches the live content once the call returns.
pub struct PromptVersioningService {
    prompts: Arc<dyn PromptContentPort>,
    store: Arc<dyn VersionStore>,
    locks: PromptLocks,
}

impl PromptVersioningService {
    pub fn new(prompts: Arc<dyn PromptContentPort>, store: Arc<dyn VersionStore>) -> Self {
        Self {
            prompts,
            store,
            locks: PromptLocks::new(),
        }
    }

    /// Runs the prompt's creation and records its live content as version 1,
    /// both under the prompt lock, so no edit can be recorded ahead of the
    /// initial version.
    pub fn create_prompt<T, F>(
        &self,
        prompt_id: Uuid,
        create: F,
    ) -> Result<(T, PromptVersion), ServiceError>
    where
        F: FnOnce() -> Result<T, ServiceError>,
    {
        self.locks.with_lock(prompt_id, || {
            let created = create()?;
            let content = self.prompts.get_live_content(prompt_id)?;
            let version = self.append(prompt_id, &content, Some(INITIAL_VERSION_SUMMARY))?;
            Ok((created, version))
        })
    }

    /// Records `new_content` as a version and makes it live, when it differs
    /// from the live content. An identical edit records and writes nothing.
    pub fn record_if_changed(
        &self,
        prompt_id: Uuid,
        new_content: &str,
        change_summary: Option<&str>,
    ) -> Result<Option<PromptVersion>, ServiceError> {
        self.locks.with_lock(prompt_id, || {
            let live = self.prompts.get_live_content(prompt_id)?;
            if live == new_content {
                debug!(prompt_id = %prompt_id, "prompt_content_unchanged");
                return Ok(None);
            }
            let version = self.append(prompt_id, new_content, change_summary)?;
            self.prompts.set_live_content(prompt_id, new_content)?;
            Ok(Some(version))
        })
    }

    /// Makes `version_id`'s content live again and records that as a new
    /// version, even when the content already matches the newest version.
    /// A refused append leaves live content untouched.
    pub fn revert(&self, prompt_id: Uuid, version_id: Uuid) -> Result<PromptVersion, ServiceError> {
        self.locks.with_lock(prompt_id, || {
            if !self.prompts.exists(prompt_id) {
                return Err(ServiceError::prompt_not_found(prompt_id));
            }
            let target = self.store.get(prompt_id, version_id)?;
            let summary = format!("Reverted to version {}", target.version_number());
            let version = self.append(prompt_id, target.content(), Some(summary.as_str()))?;
            self.prompts.set_live_content(prompt_id, target.content())?;
            info!(
                prompt_id = %prompt_id,
                reverted_to = target.version_number(),
                version = version.version_number(),
                "prompt_reverted"
            );
            Ok(version)
        })
    }

    /// Diff of version `version_id_a` (side A) against `version_id_b`
    /// (side B).
    pub fn compare(
        &self,
        prompt_id: Uuid,
        version_id_a: Uuid,
        version_id_b: Uuid,
    ) -> Result<VersionDiffResult, ServiceError> {
        let base = self.store.get(prompt_id, version_id_a)?;
        let target = self.store.get(prompt_id, version_id_b)?;
        let diff = compute_text_diff(base.content(), target.content());
        Ok(VersionDiffResult {
            base: Some(base),
            target,
            diff,
        })
    }

    /// Diff of a version against the one before it. The first version is
    /// compared against empty content.
    pub fn compare_with_previous(
        &self,
        prompt_id: Uuid,
        version_id: Uuid,
    ) -> Result<VersionDiffResult, ServiceError> {
        let target = self.store.get(prompt_id, version_id)?;
        let base = self
            .store
            .latest_before(prompt_id, target.version_number())?;
        let base_content = base.as_ref().map(PromptVersion::content).unwrap_or_default();
        let diff = compute_text_diff(base_content, target.content());
        Ok(VersionDiffResult { base, target, diff })
    }

    /// All versions of a prompt, newest first.
    pub fn list_versions(&self, prompt_id: Uuid) -> Result<Vec<PromptVersion>, ServiceError> {
        if !self.prompts.exists(prompt_id) {
            return Err(ServiceError::prompt_not_found(prompt_id));
        }
        self.store.list(prompt_id)
    }

    pub fn get_version(
        &self,
        prompt_id: Uuid,
        version_id: Uuid,
    ) -> Result<PromptVersion, ServiceError> {
        if !self.prompts.exists(prompt_id) {
            return Err(ServiceError::prompt_not_found(prompt_id));
        }
        self.store.get(prompt_id, version_id)
    }

    /// Runs the prompt's removal and purges its history in one locked step,
    /// so no append can land between the two.
    pub fn delete_prompt<F>(&self, prompt_id: Uuid, remove_prompt: F) -> Result<bool, ServiceError>
    where
        F: FnOnce() -> Result<bool, ServiceError>,
    {
        self.locks.with_lock(prompt_id, || {
            let removed = remove_prompt()?;
            if removed {
                self.store.purge(prompt_id)?;
                info!(prompt_id = %prompt_id, "prompt_history_purged");
            }
            Ok(removed)
        })
    }

    fn append(
        &self,
        prompt_id: Uuid,
        content: &str,
        change_summary: Option<&str>,
    ) -> Result<PromptVersion, ServiceError> {
        let version = self.store.append(VersionAppend {
            prompt_id: &prompt_id,
            content,
            change_summary,
        })?;
        debug!(
            prompt_id = %prompt_id,
            version_id = %version.id(),
            version = version.version_number(),
            "prompt_version_recorded"
        );
        Ok(version)
    }
}
