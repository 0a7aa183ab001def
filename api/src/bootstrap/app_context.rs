use std::sync::Arc;

use crate::application::ports::prompt_repository::PromptRepository;
use crate::application::ports::version_store::VersionStore;
use crate::application::services::versioning::service::PromptVersioningService;
use crate::bootstrap::config::Config;
use crate::infrastructure::memory::prompt_repository_memory::InMemoryPromptRepository;
use crate::infrastructure::memory::version_store_memory::InMemoryVersionStore;

/// Router state. Cloning is cheap; every component sits behind an `Arc`.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Arc<Config>,
    prompt_repo: Arc<dyn PromptRepository>,
    versioning: Arc<PromptVersioningService>,
}

impl AppContext {
    pub fn new(cfg: Config) -> Self {
        let prompts = Arc::new(InMemoryPromptRepository::new());
        let versions: Arc<dyn VersionStore> = Arc::new(InMemoryVersionStore::new());
        let versioning = Arc::new(PromptVersioningService::new(prompts.clone(), versions));
        Self {
            cfg: Arc::new(cfg),
            prompt_repo: prompts,
            versioning,
        }
    }

    pub fn prompt_repo(&self) -> Arc<dyn PromptRepository> {
        self.prompt_repo.clone()
    }

    pub fn versioning_service(&self) -> Arc<PromptVersioningService> {
        self.versioning.clone()
    }
}
