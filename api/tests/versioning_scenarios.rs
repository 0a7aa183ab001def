use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use promptlab_api::application::dto::diff::DiffOp;
use promptlab_api::application::errors::ServiceError;
use promptlab_api::application::ports::prompt_repository::{PromptContentPort, PromptRepository};
use promptlab_api::application::services::versioning::service::PromptVersioningService;
use promptlab_api::application::use_cases::prompts::create_prompt::{CreatePrompt, PromptFields};
use promptlab_api::application::use_cases::prompts::delete_prompt::DeletePrompt;
use promptlab_api::application::use_cases::prompts::patch_prompt::{PatchPrompt, PromptPatch};
use promptlab_api::domain::prompts::version::PromptVersion;
use promptlab_api::infrastructure::memory::prompt_repository_memory::InMemoryPromptRepository;
use promptlab_api::infrastructure::memory::version_store_memory::InMemoryVersionStore;
use uuid::Uuid;

struct Harness {
    prompts: Arc<InMemoryPromptRepository>,
    versioning: Arc<PromptVersioningService>,
}

impl Harness {
    fn new() -> Self {
        let prompts = Arc::new(InMemoryPromptRepository::new());
        let versioning = Arc::new(PromptVersioningService::new(
            prompts.clone(),
            Arc::new(InMemoryVersionStore::new()),
        ));
        Self {
            prompts,
            versioning,
        }
    }

    fn create(&self, content: &str) -> Uuid {
        CreatePrompt {
            repo: self.prompts.as_ref(),
            versioning: self.versioning.as_ref(),
        }
        .execute(PromptFields {
            title: "Scenario".into(),
            content: content.into(),
            description: None,
            collection_id: None,
        })
        .unwrap()
        .id
    }

    fn edit(&self, prompt_id: Uuid, content: &str) -> Option<PromptVersion> {
        PatchPrompt {
            repo: self.prompts.as_ref(),
            versioning: self.versioning.as_ref(),
        }
        .execute(
            prompt_id,
            PromptPatch {
                content: Some(content.into()),
                ..Default::default()
            },
            None,
        )
        .unwrap()
        .version
    }

    fn numbers_ascending(&self, prompt_id: Uuid) -> Vec<i64> {
        let mut numbers: Vec<i64> = self
            .versioning
            .list_versions(prompt_id)
            .unwrap()
            .iter()
            .map(PromptVersion::version_number)
            .collect();
        numbers.sort_unstable();
        numbers
    }
}

#[test]
fn create_edit_noop_revert_compare() {
    let h = Harness::new();
    let prompt_id = h.create("A");
    let versions = h.versioning.list_versions(prompt_id).unwrap();
    assert_eq!(versions.len(), 1);
    let v1 = versions[0].clone();
    assert_eq!((v1.version_number(), v1.content()), (1, "A"));

    let v2 = h.edit(prompt_id, "B").expect("content changed");
    assert_eq!((v2.version_number(), v2.content()), (2, "B"));

    assert!(h.edit(prompt_id, "B").is_none());
    assert_eq!(h.numbers_ascending(prompt_id), vec![1, 2]);

    let v3 = h.versioning.revert(prompt_id, v1.id()).unwrap();
    assert_eq!((v3.version_number(), v3.content()), (3, "A"));
    assert_eq!(h.prompts.get_live_content(prompt_id).unwrap(), "A");
    let newest = &h.versioning.list_versions(prompt_id).unwrap()[0];
    assert_eq!(newest.id(), v3.id());

    let diff = h.versioning.compare(prompt_id, v2.id(), v3.id()).unwrap().diff;
    let removed: Vec<_> = diff
        .lines
        .iter()
        .filter(|l| l.op == DiffOp::Removed)
        .map(|l| l.text.as_str())
        .collect();
    let added: Vec<_> = diff
        .lines
        .iter()
        .filter(|l| l.op == DiffOp::Added)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(removed, vec!["B"]);
    assert_eq!(added, vec!["A"]);
}

#[test]
fn revert_to_current_content_still_records_history() {
    let h = Harness::new();
    let prompt_id = h.create("same");
    let v1 = h.versioning.list_versions(prompt_id).unwrap()[0].clone();
    let v2 = h.versioning.revert(prompt_id, v1.id()).unwrap();
    let v3 = h.versioning.revert(prompt_id, v2.id()).unwrap();
    assert_eq!(v3.version_number(), 3);
    assert_eq!(h.numbers_ascending(prompt_id), vec![1, 2, 3]);
}

#[test]
fn numbering_stays_contiguous_across_mixed_operations() {
    let h = Harness::new();
    let prompt_id = h.create("0");
    let v1 = h.versioning.list_versions(prompt_id).unwrap()[0].clone();
    for i in 1..=5 {
        h.edit(prompt_id, &i.to_string());
        h.edit(prompt_id, &i.to_string());
    }
    h.versioning.revert(prompt_id, v1.id()).unwrap();
    h.edit(prompt_id, "tail");
    assert_eq!(h.numbers_ascending(prompt_id), (1..=8).collect::<Vec<_>>());
}

#[test]
fn self_compare_has_no_changes() {
    let h = Harness::new();
    let prompt_id = h.create("first line\nsecond line\n");
    let v1 = h.versioning.list_versions(prompt_id).unwrap()[0].clone();
    let result = h.versioning.compare(prompt_id, v1.id(), v1.id()).unwrap();
    assert!(result.diff.lines.iter().all(|l| l.op == DiffOp::Unchanged));
    assert_eq!((result.diff.added, result.diff.removed), (0, 0));
}

#[test]
fn deleted_prompt_leaves_no_versions_behind() {
    let h = Harness::new();
    let prompt_id = h.create("A");
    let v2 = h.edit(prompt_id, "B").unwrap();
    DeletePrompt {
        repo: h.prompts.as_ref(),
        versioning: h.versioning.as_ref(),
    }
    .execute(prompt_id)
    .unwrap();

    assert!(matches!(
        h.versioning.list_versions(prompt_id),
        Err(ServiceError::NotFound { entity: "prompt", .. })
    ));
    assert!(h.versioning.get_version(prompt_id, v2.id()).is_err());
    assert!(h.versioning.compare(prompt_id, v2.id(), v2.id()).is_err());
    assert!(!h.prompts.exists(prompt_id));
}

#[test]
fn concurrent_reverts_append_consecutive_versions() {
    let h = Harness::new();
    let prompt_id = h.create("A");
    h.edit(prompt_id, "B");
    h.edit(prompt_id, "C");
    let history = h.versioning.list_versions(prompt_id).unwrap();
    let v1 = history.iter().find(|v| v.version_number() == 1).unwrap().id();
    let v2 = history.iter().find(|v| v.version_number() == 2).unwrap().id();

    let barrier = Arc::new(Barrier::new(2));
    let workers: Vec<_> = [v1, v2]
        .into_iter()
        .map(|target| {
            let versioning = Arc::clone(&h.versioning);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                versioning.revert(prompt_id, target).unwrap()
            })
        })
        .collect();
    let created: Vec<PromptVersion> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    let numbers: HashSet<i64> = created.iter().map(PromptVersion::version_number).collect();
    assert_eq!(numbers, HashSet::from([4, 5]));
    let contents: HashSet<&str> = created.iter().map(PromptVersion::content).collect();
    assert_eq!(contents, HashSet::from(["A", "B"]));

    let last = created.iter().max_by_key(|v| v.version_number()).unwrap();
    assert_eq!(h.prompts.get_live_content(prompt_id).unwrap(), last.content());
    assert_eq!(h.numbers_ascending(prompt_id), vec![1, 2, 3, 4, 5]);
}

#[test]
fn concurrent_edits_and_reverts_keep_live_content_in_sync() {
    let h = Harness::new();
    let prompt_id = h.create("seed");
    let v1 = h.versioning.list_versions(prompt_id).unwrap()[0].id();
    let barrier = Arc::new(Barrier::new(6));

    let workers: Vec<_> = (0..6)
        .map(|worker| {
            let prompts = Arc::clone(&h.prompts);
            let versioning = Arc::clone(&h.versioning);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..20 {
                    if worker % 2 == 0 {
                        versioning.revert(prompt_id, v1).unwrap();
                    } else {
                        versioning
                            .record_if_changed(prompt_id, &format!("w{worker}-{i}"), None)
                            .unwrap();
                    }
                    let _ = prompts.get(prompt_id).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let history = h.versioning.list_versions(prompt_id).unwrap();
    let numbers = h.numbers_ascending(prompt_id);
    assert_eq!(numbers, (1..=history.len() as i64).collect::<Vec<_>>());
    assert_eq!(
        h.prompts.get_live_content(prompt_id).unwrap(),
        history[0].content()
    );
}
