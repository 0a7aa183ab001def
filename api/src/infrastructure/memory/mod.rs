pub mod prompt_repository_memory;
pub mod version_store_memory;
