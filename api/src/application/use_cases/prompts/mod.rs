pub mod compare_versions;
pub mod create_prompt;
pub mod delete_prompt;
pub mod get_prompt;
pub mod get_version;
pub mod list_prompts;
pub mod list_versions;
pub mod patch_prompt;
pub mod revert_version;
pub mod update_prompt;
pub mod validation;
