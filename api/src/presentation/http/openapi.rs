use utoipa::OpenApi;

use crate::presentation::http::{health, prompts, versions};

#[derive(OpenApi)]
#[openapi(
    info(title = "PromptLab API", description = "Prompt templates with versioned content"),
    paths(
        health::health_check,
        prompts::list_prompts,
        prompts::create_prompt,
        prompts::get_prompt,
        prompts::update_prompt,
        prompts::patch_prompt,
        prompts::delete_prompt,
        versions::list_versions,
        versions::get_version,
        versions::revert_version,
        versions::diff_versions,
    ),
    components(schemas(
        health::HealthResponse,
        prompts::Prompt,
        prompts::PromptListResponse,
        prompts::PromptUpdateResponse,
        prompts::CreatePromptRequest,
        prompts::UpdatePromptRequest,
        prompts::PatchPromptRequest,
        versions::VersionSummary,
        versions::VersionDetail,
        versions::VersionListResponse,
        versions::RevertResponse,
        versions::DiffLineKind,
        versions::DiffLineResponse,
        versions::VersionDiffResponse,
    )),
    tags(
        (name = "Prompts", description = "Prompt templates"),
        (name = "Versions", description = "Prompt content history"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
