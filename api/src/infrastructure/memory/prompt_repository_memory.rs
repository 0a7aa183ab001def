use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::prompt_repository::{
    PromptContentPort, PromptDetails, PromptInsert, PromptListFilter, PromptRepository,
};
use crate::domain::prompts::prompt::Prompt;

#[derive(Default)]
pub struct InMemoryPromptRepository {
    prompts: RwLock<HashMap<Uuid, Prompt>>,
}

impl InMemoryPromptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, Prompt>> {
        self.prompts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Prompt>> {
        self.prompts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PromptContentPort for InMemoryPromptRepository {
    fn get_live_content(&self, prompt_id: Uuid) -> Result<String, ServiceError> {
        self.read()
            .get(&prompt_id)
            .map(|p| p.content.clone())
            .ok_or_else(|| ServiceError::prompt_not_found(prompt_id))
    }

    fn set_live_content(&self, prompt_id: Uuid, content: &str) -> Result<(), ServiceError> {
        let mut prompts = self.write();
        let prompt = prompts
            .get_mut(&prompt_id)
            .ok_or_else(|| ServiceError::prompt_not_found(prompt_id))?;
        prompt.content = content.to_owned();
        prompt.updated_at = Utc::now();
        Ok(())
    }

    fn exists(&self, prompt_id: Uuid) -> bool {
        self.read().contains_key(&prompt_id)
    }
}

impl PromptRepository for InMemoryPromptRepository {
    fn create(&self, input: PromptInsert<'_>) -> Result<Prompt, ServiceError> {
        let now = Utc::now();
        let prompt = Prompt {
            id: input.id,
            title: input.title.to_owned(),
            content: input.content.to_owned(),
            description: input.description.map(str::to_owned),
            collection_id: input.collection_id,
            created_at: now,
            updated_at: now,
        };
        let mut prompts = self.write();
        if prompts.contains_key(&prompt.id) {
            return Err(ServiceError::validation(format!(
                "prompt id already in use: {}",
                prompt.id
            )));
        }
        prompts.insert(prompt.id, prompt.clone());
        Ok(prompt)
    }

    fn get(&self, prompt_id: Uuid) -> Result<Option<Prompt>, ServiceError> {
        Ok(self.read().get(&prompt_id).cloned())
    }

    fn list(&self, filter: &PromptListFilter) -> Result<Vec<Prompt>, ServiceError> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let mut prompts: Vec<Prompt> = self
            .read()
            .values()
            .filter(|p| filter.collection_id.is_none() || p.collection_id == filter.collection_id)
            .filter(|p| match &needle {
                Some(needle) => matches_search(p, needle),
                None => true,
            })
            .cloned()
            .collect();
        prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(prompts)
    }

    fn update_details(
        &self,
        prompt_id: Uuid,
        details: PromptDetails<'_>,
    ) -> Result<Option<Prompt>, ServiceError> {
        let mut prompts = self.write();
        let Some(prompt) = prompts.get_mut(&prompt_id) else {
            return Ok(None);
        };
        prompt.title = details.title.to_owned();
        prompt.description = details.description.map(str::to_owned);
        prompt.collection_id = details.collection_id;
        prompt.updated_at = Utc::now();
        Ok(Some(prompt.clone()))
    }

    fn delete(&self, prompt_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.write().remove(&prompt_id).is_some())
    }
}

fn matches_search(prompt: &Prompt, needle: &str) -> bool {
    prompt.title.to_lowercase().contains(needle)
        || prompt
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(repo: &InMemoryPromptRepository, title: &str, collection_id: Option<Uuid>) -> Prompt {
        repo.create(PromptInsert {
            id: Uuid::new_v4(),
            title,
            content: "content",
            description: Some("shared description"),
            collection_id,
        })
        .unwrap()
    }

    #[test]
    fn live_content_round_trips() {
        let repo = InMemoryPromptRepository::new();
        let prompt = insert(&repo, "One", None);
        assert!(repo.exists(prompt.id));
        repo.set_live_content(prompt.id, "changed").unwrap();
        assert_eq!(repo.get_live_content(prompt.id).unwrap(), "changed");
        let stored = repo.get(prompt.id).unwrap().unwrap();
        assert!(stored.updated_at >= prompt.updated_at);
    }

    #[test]
    fn unknown_prompt_is_not_found() {
        let repo = InMemoryPromptRepository::new();
        let id = Uuid::new_v4();
        assert!(!repo.exists(id));
        assert!(matches!(
            repo.get_live_content(id),
            Err(ServiceError::NotFound { entity: "prompt", .. })
        ));
        assert!(repo.set_live_content(id, "x").is_err());
        let details = PromptDetails {
            title: "t",
            description: None,
            collection_id: None,
        };
        assert!(repo.update_details(id, details).unwrap().is_none());
    }

    #[test]
    fn list_filters_by_collection_and_search() {
        let repo = InMemoryPromptRepository::new();
        let collection = Uuid::new_v4();
        insert(&repo, "Summarize article", Some(collection));
        insert(&repo, "Translate text", Some(collection));
        insert(&repo, "Summarize email", None);

        let in_collection = repo
            .list(&PromptListFilter {
                collection_id: Some(collection),
                search: None,
            })
            .unwrap();
        assert_eq!(in_collection.len(), 2);

        let searched = repo
            .list(&PromptListFilter {
                collection_id: None,
                search: Some("SUMMARIZE".into()),
            })
            .unwrap();
        assert_eq!(searched.len(), 2);

        let both = repo
            .list(&PromptListFilter {
                collection_id: Some(collection),
                search: Some("summarize".into()),
            })
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "Summarize article");
    }

    #[test]
    fn search_matches_description() {
        let repo = InMemoryPromptRepository::new();
        insert(&repo, "One", None);
        let found = repo
            .list(&PromptListFilter {
                collection_id: None,
                search: Some("shared".into()),
            })
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn list_is_newest_first() {
        let repo = InMemoryPromptRepository::new();
        let first = insert(&repo, "first", None);
        let second = insert(&repo, "second", None);
        let listed = repo.list(&PromptListFilter::default()).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
        let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
        assert!(ids.contains(&first.id) && ids.contains(&second.id));
    }

    #[test]
    fn create_refuses_a_taken_id() {
        let repo = InMemoryPromptRepository::new();
        let prompt = insert(&repo, "One", None);
        let err = repo
            .create(PromptInsert {
                id: prompt.id,
                title: "Two",
                content: "other",
                description: None,
                collection_id: None,
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(repo.get(prompt.id).unwrap().unwrap().title, "One");
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let repo = InMemoryPromptRepository::new();
        let prompt = insert(&repo, "One", None);
        assert!(repo.delete(prompt.id).unwrap());
        assert!(!repo.delete(prompt.id).unwrap());
        assert!(!repo.exists(prompt.id));
    }
}
