pub mod prompt_repository;
pub mod version_store;
