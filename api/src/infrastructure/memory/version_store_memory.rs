use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::error;
use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::version_store::{VersionAppend, VersionStore};
use crate::application::services::versioning::locks::lock_unpoisoned;
use crate::domain::prompts::version::PromptVersion;

/// Versions of one prompt in ascending `version_number` order.
type VersionLog = Arc<Mutex<Vec<PromptVersion>>>;

/// Process-local version store.
///
/// Each prompt owns its own log behind its own mutex, so appends to
/// different prompts never contend. Logs are created on first append and
/// kept (emptied, not removed) on purge.
#[derive(Default)]
pub struct InMemoryVersionStore {
    logs: RwLock<HashMap<Uuid, VersionLog>>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn existing_log(&self, prompt_id: Uuid) -> Option<VersionLog> {
        self.read_logs().get(&prompt_id).cloned()
    }

    fn log_for(&self, prompt_id: Uuid) -> VersionLog {
        if let Some(log) = self.existing_log(prompt_id) {
            return log;
        }
        Arc::clone(self.write_logs().entry(prompt_id).or_default())
    }

    fn read_logs(&self) -> RwLockReadGuard<'_, HashMap<Uuid, VersionLog>> {
        self.logs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_logs(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, VersionLog>> {
        self.logs.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VersionStore for InMemoryVersionStore {
    fn append(&self, input: VersionAppend<'_>) -> Result<PromptVersion, ServiceError> {
        let prompt_id = *input.prompt_id;
        let id = Uuid::new_v4();
        let content = input.content.to_owned();
        let change_summary = input.change_summary.map(str::to_owned);
        let now = Utc::now();

        let log = self.log_for(prompt_id);
        let mut versions = lock_unpoisoned(&log);
        let next = versions.last().map_or(1, |v| v.version_number() + 1);
        if usize::try_from(next - 1).ok() != Some(versions.len()) {
            error!(
                prompt_id = %prompt_id,
                version = next,
                stored = versions.len(),
                "version_sequence_violation"
            );
            return Err(ServiceError::ConcurrencyInvariantViolation {
                prompt_id,
                version_number: next,
            });
        }
        // Clock steps backwards must not reorder history.
        let created_at = versions
            .last()
            .map_or(now, |prev| prev.created_at().max(now));
        let version = PromptVersion::new(id, prompt_id, next, content, created_at, change_summary);
        versions.push(version.clone());
        Ok(version)
    }

    fn list(&self, prompt_id: Uuid) -> Result<Vec<PromptVersion>, ServiceError> {
        let Some(log) = self.existing_log(prompt_id) else {
            return Ok(Vec::new());
        };
        let versions = lock_unpoisoned(&log);
        Ok(versions.iter().rev().cloned().collect())
    }

    fn get(&self, prompt_id: Uuid, version_id: Uuid) -> Result<PromptVersion, ServiceError> {
        let Some(log) = self.existing_log(prompt_id) else {
            return Err(ServiceError::version_not_found(version_id));
        };
        let versions = lock_unpoisoned(&log);
        versions
            .iter()
            .find(|v| v.id() == version_id)
            .cloned()
            .ok_or_else(|| ServiceError::version_not_found(version_id))
    }

    fn latest_before(
        &self,
        prompt_id: Uuid,
        version_number: i64,
    ) -> Result<Option<PromptVersion>, ServiceError> {
        let Some(log) = self.existing_log(prompt_id) else {
            return Ok(None);
        };
        let versions = lock_unpoisoned(&log);
        Ok(versions
            .iter()
            .rev()
            .find(|v| v.version_number() < version_number)
            .cloned())
    }

    fn purge(&self, prompt_id: Uuid) -> Result<(), ServiceError> {
        if let Some(log) = self.existing_log(prompt_id) {
            lock_unpoisoned(&log).clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn append(store: &InMemoryVersionStore, prompt_id: Uuid, content: &str) -> PromptVersion {
        store
            .append(VersionAppend {
                prompt_id: &prompt_id,
                content,
                change_summary: None,
            })
            .unwrap()
    }

    #[test]
    fn numbers_start_at_one_and_increase() {
        let store = InMemoryVersionStore::new();
        let prompt_id = Uuid::new_v4();
        let numbers: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|c| append(&store, prompt_id, c).version_number())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn prompts_have_independent_sequences() {
        let store = InMemoryVersionStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        append(&store, a, "a1");
        append(&store, a, "a2");
        assert_eq!(append(&store, b, "b1").version_number(), 1);
    }

    #[test]
    fn list_is_newest_first() {
        let store = InMemoryVersionStore::new();
        let prompt_id = Uuid::new_v4();
        append(&store, prompt_id, "old");
        append(&store, prompt_id, "new");
        let listed = store.list(prompt_id).unwrap();
        let contents: Vec<_> = listed.iter().map(PromptVersion::content).collect();
        assert_eq!(contents, vec!["new", "old"]);
        assert!(listed[0].created_at() >= listed[1].created_at());
    }

    #[test]
    fn list_of_unknown_prompt_is_empty() {
        let store = InMemoryVersionStore::new();
        assert!(store.list(Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn get_is_scoped_by_prompt() {
        let store = InMemoryVersionStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let version = append(&store, a, "a1");
        append(&store, b, "b1");
        assert_eq!(store.get(a, version.id()).unwrap(), version);
        assert!(matches!(
            store.get(b, version.id()),
            Err(ServiceError::NotFound { entity: "version", .. })
        ));
    }

    #[test]
    fn change_summary_is_kept() {
        let store = InMemoryVersionStore::new();
        let prompt_id = Uuid::new_v4();
        let version = store
            .append(VersionAppend {
                prompt_id: &prompt_id,
                content: "x",
                change_summary: Some("tightened wording"),
            })
            .unwrap();
        assert_eq!(version.change_summary(), Some("tightened wording"));
    }

    #[test]
    fn latest_before_skips_to_previous_number() {
        let store = InMemoryVersionStore::new();
        let prompt_id = Uuid::new_v4();
        let v1 = append(&store, prompt_id, "1");
        append(&store, prompt_id, "2");
        append(&store, prompt_id, "3");
        assert_eq!(store.latest_before(prompt_id, 2).unwrap(), Some(v1));
        assert_eq!(
            store
                .latest_before(prompt_id, 3)
                .unwrap()
                .map(|v| v.version_number()),
            Some(2)
        );
        assert_eq!(store.latest_before(prompt_id, 1).unwrap(), None);
    }

    #[test]
    fn purge_removes_everything_and_is_idempotent() {
        let store = InMemoryVersionStore::new();
        let prompt_id = Uuid::new_v4();
        let version = append(&store, prompt_id, "x");
        store.purge(prompt_id).unwrap();
        store.purge(prompt_id).unwrap();
        store.purge(Uuid::new_v4()).unwrap();
        assert!(store.list(prompt_id).unwrap().is_empty());
        assert!(store.get(prompt_id, version.id()).is_err());
    }

    #[test]
    fn corrupted_sequence_refuses_the_write() {
        let store = InMemoryVersionStore::new();
        let prompt_id = Uuid::new_v4();
        let first = append(&store, prompt_id, "x");
        {
            let log = store.log_for(prompt_id);
            lock_unpoisoned(&log).push(first.clone());
        }
        let err = store
            .append(VersionAppend {
                prompt_id: &prompt_id,
                content: "y",
                change_summary: None,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ConcurrencyInvariantViolation { version_number: 2, .. }
        ));
        assert_eq!(store.list(prompt_id).unwrap().len(), 2);
    }

    #[test]
    fn concurrent_appends_never_share_a_number() {
        let store = Arc::new(InMemoryVersionStore::new());
        let prompt_id = Uuid::new_v4();
        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        append(&store, prompt_id, &format!("{worker}-{i}"));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        let mut numbers: Vec<_> = store
            .list(prompt_id)
            .unwrap()
            .iter()
            .map(PromptVersion::version_number)
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=200).collect::<Vec<_>>());
    }
}
