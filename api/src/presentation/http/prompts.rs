use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::prompt_repository::PromptListFilter;
use crate::application::services::templates::extract_variables;
use crate::application::use_cases::prompts::create_prompt::{CreatePrompt, PromptFields};
use crate::application::use_cases::prompts::delete_prompt::DeletePrompt;
use crate::application::use_cases::prompts::get_prompt::GetPrompt;
use crate::application::use_cases::prompts::list_prompts::ListPrompts;
use crate::application::use_cases::prompts::patch_prompt::{PatchPrompt, PromptPatch};
use crate::application::use_cases::prompts::update_prompt::{PromptUpdateOutcome, UpdatePrompt};
use crate::bootstrap::app_context::AppContext;
use crate::domain::prompts::prompt as domain;
use crate::presentation::http::parse_path_id;
use crate::presentation::http::status_from;
use crate::presentation::http::versions::{VersionSummary, version_summary_from};

#[derive(Debug, Serialize, ToSchema)]
pub struct Prompt {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub collection_id: Option<Uuid>,
    /// `{{name}}` placeholders found in `content`.
    pub variables: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub(crate) fn to_http_prompt(prompt: domain::Prompt) -> Prompt {
    let variables = extract_variables(&prompt.content);
    Prompt {
        id: prompt.id,
        title: prompt.title,
        content: prompt.content,
        description: prompt.description,
        collection_id: prompt.collection_id,
        variables,
        created_at: prompt.created_at,
        updated_at: prompt.updated_at,
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptListResponse {
    pub items: Vec<Prompt>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptUpdateResponse {
    pub prompt: Prompt,
    /// Version recorded by this edit; absent when content did not change.
    pub version: Option<VersionSummary>,
}

fn update_response_from(outcome: PromptUpdateOutcome) -> PromptUpdateResponse {
    PromptUpdateResponse {
        prompt: to_http_prompt(outcome.prompt),
        version: outcome.version.map(version_summary_from),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePromptRequest {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub collection_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePromptRequest {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub collection_id: Option<Uuid>,
    pub change_summary: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchPromptRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub description: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub collection_id: DoubleOption<Uuid>,
    pub change_summary: Option<String>,
}

/// Distinguishes an absent JSON field from an explicit `null`.
#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> DoubleOption<T> {
    fn into_patch(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(value) => Some(Some(value)),
        }
    }
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPromptsQuery {
    pub collection_id: Option<Uuid>,
    pub search: Option<String>,
}

#[utoipa::path(get, path = "/api/prompts", tag = "Prompts",
    params(
        ("collection_id" = Option<Uuid>, Query, description = "Only prompts in this collection"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or description")
    ),
    responses((status = 200, body = PromptListResponse)))]
pub async fn list_prompts(
    State(ctx): State<AppContext>,
    q: Option<Query<ListPromptsQuery>>,
) -> Result<Json<PromptListResponse>, StatusCode> {
    let params = q.map(|Query(v)| v).unwrap_or_default();
    let repo = ctx.prompt_repo();
    let uc = ListPrompts {
        repo: repo.as_ref(),
    };
    let prompts = uc
        .execute(PromptListFilter {
            collection_id: params.collection_id,
            search: params.search,
        })
        .map_err(status_from)?;
    let items: Vec<Prompt> = prompts.into_iter().map(to_http_prompt).collect();
    let total = items.len();
    Ok(Json(PromptListResponse { items, total }))
}

#[utoipa::path(post, path = "/api/prompts", tag = "Prompts", request_body = CreatePromptRequest,
    responses((status = 201, body = Prompt), (status = 422, description = "Invalid prompt fields")))]
pub async fn create_prompt(
    State(ctx): State<AppContext>,
    Json(req): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<Prompt>), StatusCode> {
    let repo = ctx.prompt_repo();
    let versioning = ctx.versioning_service();
    let uc = CreatePrompt {
        repo: repo.as_ref(),
        versioning: versioning.as_ref(),
    };
    let prompt = uc
        .execute(PromptFields {
            title: req.title,
            content: req.content,
            description: req.description,
            collection_id: req.collection_id,
        })
        .map_err(status_from)?;
    Ok((StatusCode::CREATED, Json(to_http_prompt(prompt))))
}

#[utoipa::path(get, path = "/api/prompts/{id}", tag = "Prompts",
    params(("id" = Uuid, Path, description = "Prompt ID")),
    responses((status = 200, body = Prompt), (status = 404, description = "Prompt not found")))]
pub async fn get_prompt(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Prompt>, StatusCode> {
    let id = parse_path_id("prompt", &id)?;
    let repo = ctx.prompt_repo();
    let uc = GetPrompt {
        repo: repo.as_ref(),
    };
    let prompt = uc.execute(id).map_err(status_from)?;
    Ok(Json(to_http_prompt(prompt)))
}

#[utoipa::path(put, path = "/api/prompts/{id}", tag = "Prompts", request_body = UpdatePromptRequest,
    params(("id" = Uuid, Path, description = "Prompt ID")),
    responses((status = 200, body = PromptUpdateResponse), (status = 404, description = "Prompt not found")))]
pub async fn update_prompt(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePromptRequest>,
) -> Result<Json<PromptUpdateResponse>, StatusCode> {
    let id = parse_path_id("prompt", &id)?;
    let repo = ctx.prompt_repo();
    let versioning = ctx.versioning_service();
    let uc = UpdatePrompt {
        repo: repo.as_ref(),
        versioning: versioning.as_ref(),
    };
    let outcome = uc
        .execute(
            id,
            PromptFields {
                title: req.title,
                content: req.content,
                description: req.description,
                collection_id: req.collection_id,
            },
            req.change_summary.as_deref(),
        )
        .map_err(status_from)?;
    Ok(Json(update_response_from(outcome)))
}

#[utoipa::path(patch, path = "/api/prompts/{id}", tag = "Prompts", request_body = PatchPromptRequest,
    params(("id" = Uuid, Path, description = "Prompt ID")),
    responses((status = 200, body = PromptUpdateResponse), (status = 404, description = "Prompt not found")))]
pub async fn patch_prompt(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(req): Json<PatchPromptRequest>,
) -> Result<Json<PromptUpdateResponse>, StatusCode> {
    let id = parse_path_id("prompt", &id)?;
    let repo = ctx.prompt_repo();
    let versioning = ctx.versioning_service();
    let uc = PatchPrompt {
        repo: repo.as_ref(),
        versioning: versioning.as_ref(),
    };
    let patch = PromptPatch {
        title: req.title,
        content: req.content,
        description: req.description.into_patch(),
        collection_id: req.collection_id.into_patch(),
    };
    let outcome = uc
        .execute(id, patch, req.change_summary.as_deref())
        .map_err(status_from)?;
    Ok(Json(update_response_from(outcome)))
}

#[utoipa::path(delete, path = "/api/prompts/{id}", tag = "Prompts",
    params(("id" = Uuid, Path, description = "Prompt ID")),
    responses((status = 204, description = "Prompt and its versions deleted"), (status = 404, description = "Prompt not found")))]
pub async fn delete_prompt(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_path_id("prompt", &id)?;
    let repo = ctx.prompt_repo();
    let versioning = ctx.versioning_service();
    let uc = DeletePrompt {
        repo: repo.as_ref(),
        versioning: versioning.as_ref(),
    };
    uc.execute(id).map_err(status_from)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/prompts", get(list_prompts).post(create_prompt))
        .route(
            "/prompts/:id",
            get(get_prompt)
                .put(update_prompt)
                .patch(patch_prompt)
                .delete(delete_prompt),
        )
        .with_state(ctx)
}
