use crate::application::errors::ServiceError;
use crate::application::use_cases::prompts::create_prompt::{CreatePrompt, PromptFields};
use crate::bootstrap::app_context::AppContext;

const SAMPLE_PROMPTS: &[(&str, &str, &str)] = &[
    (
        "Summarize article",
        "Summarize the following article in {{sentences}} sentences:\n\n{{article}}",
        "Short summaries for long-form text",
    ),
    (
        "Code review",
        "Review this {{language}} code and list concrete issues:\n\n{{code}}",
        "Focused review comments",
    ),
    (
        "Translate",
        "Translate the text below from {{source}} to {{target}}.\n\n{{text}}",
        "Plain translation without commentary",
    ),
];

/// Creates a few sample prompts, each with its initial version.
pub fn seed_initial_data(ctx: &AppContext) -> Result<usize, ServiceError> {
    let repo = ctx.prompt_repo();
    let versioning = ctx.versioning_service();
    let uc = CreatePrompt {
        repo: repo.as_ref(),
        versioning: versioning.as_ref(),
    };
    for (title, content, description) in SAMPLE_PROMPTS {
        uc.execute(PromptFields {
            title: (*title).to_string(),
            content: (*content).to_string(),
            description: Some((*description).to_string()),
            collection_id: None,
        })?;
    }
    Ok(SAMPLE_PROMPTS.len())
}
