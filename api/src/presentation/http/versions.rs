use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::diff::{DiffLine, DiffOp, VersionDiffResult};
use crate::application::use_cases::prompts::compare_versions::CompareVersions;
use crate::application::use_cases::prompts::get_version::GetVersion;
use crate::application::use_cases::prompts::list_versions::ListVersions;
use crate::application::use_cases::prompts::revert_version::RevertVersion;
use crate::bootstrap::app_context::AppContext;
use crate::domain::prompts::version::PromptVersion;
use crate::presentation::http::prompts::{Prompt, to_http_prompt};
use crate::presentation::http::{parse_path_id, status_from};

#[derive(Debug, Serialize, ToSchema)]
pub struct VersionSummary {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub version_number: i64,
    pub change_summary: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VersionDetail {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub version_number: i64,
    pub content: String,
    pub change_summary: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VersionListResponse {
    pub items: Vec<VersionSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevertResponse {
    pub prompt: Prompt,
    pub version: VersionDetail,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    Unchanged,
    Added,
    Removed,
}

impl From<DiffOp> for DiffLineKind {
    fn from(value: DiffOp) -> Self {
        match value {
            DiffOp::Unchanged => DiffLineKind::Unchanged,
            DiffOp::Added => DiffLineKind::Added,
            DiffOp::Removed => DiffLineKind::Removed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiffLineResponse {
    pub op: DiffLineKind,
    pub line_number_a: Option<u32>,
    pub line_number_b: Option<u32>,
    pub text: String,
}

impl From<DiffLine> for DiffLineResponse {
    fn from(line: DiffLine) -> Self {
        Self {
            op: line.op.into(),
            line_number_a: line.line_number_a,
            line_number_b: line.line_number_b,
            text: line.text,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VersionDiffResponse {
    /// Side A; absent when diffing the first version against empty content.
    pub base: Option<VersionSummary>,
    /// Side B.
    pub target: VersionSummary,
    pub lines: Vec<DiffLineResponse>,
    pub added: usize,
    pub removed: usize,
}

impl From<VersionDiffResult> for VersionDiffResponse {
    fn from(result: VersionDiffResult) -> Self {
        Self {
            base: result.base.map(version_summary_from),
            target: version_summary_from(result.target),
            lines: result.diff.lines.into_iter().map(Into::into).collect(),
            added: result.diff.added,
            removed: result.diff.removed,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub compare: Option<String>,
}

pub(crate) fn version_summary_from(version: PromptVersion) -> VersionSummary {
    VersionSummary {
        id: version.id(),
        prompt_id: version.prompt_id(),
        version_number: version.version_number(),
        change_summary: version.change_summary().map(str::to_owned),
        created_at: version.created_at(),
    }
}

fn version_detail_from(version: PromptVersion) -> VersionDetail {
    VersionDetail {
        id: version.id(),
        prompt_id: version.prompt_id(),
        version_number: version.version_number(),
        content: version.content().to_owned(),
        change_summary: version.change_summary().map(str::to_owned),
        created_at: version.created_at(),
    }
}

#[utoipa::path(get, path = "/api/prompts/{id}/versions", tag = "Versions",
    params(("id" = Uuid, Path, description = "Prompt ID")),
    responses((status = 200, body = VersionListResponse), (status = 404, description = "Prompt not found")))]
pub async fn list_versions(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<VersionListResponse>, StatusCode> {
    let id = parse_path_id("prompt", &id)?;
    let versioning = ctx.versioning_service();
    let uc = ListVersions {
        versioning: versioning.as_ref(),
    };
    let versions = uc.execute(id).map_err(status_from)?;
    let items: Vec<VersionSummary> = versions.into_iter().map(version_summary_from).collect();
    let total = items.len();
    Ok(Json(VersionListResponse { items, total }))
}

#[utoipa::path(get, path = "/api/prompts/{id}/versions/{version_id}", tag = "Versions",
    params(
        ("id" = Uuid, Path, description = "Prompt ID"),
        ("version_id" = Uuid, Path, description = "Version ID")
    ),
    responses((status = 200, body = VersionDetail), (status = 404, description = "Prompt or version not found")))]
pub async fn get_version(
    State(ctx): State<AppContext>,
    Path((id, version_id)): Path<(String, String)>,
) -> Result<Json<VersionDetail>, StatusCode> {
    let id = parse_path_id("prompt", &id)?;
    let version_id = parse_path_id("version", &version_id)?;
    let versioning = ctx.versioning_service();
    let uc = GetVersion {
        versioning: versioning.as_ref(),
    };
    let version = uc.execute(id, version_id).map_err(status_from)?;
    Ok(Json(version_detail_from(version)))
}

#[utoipa::path(post, path = "/api/prompts/{id}/versions/{version_id}/revert", tag = "Versions",
    params(
        ("id" = Uuid, Path, description = "Prompt ID"),
        ("version_id" = Uuid, Path, description = "Version to restore")
    ),
    responses((status = 200, body = RevertResponse), (status = 404, description = "Prompt or version not found")))]
pub async fn revert_version(
    State(ctx): State<AppContext>,
    Path((id, version_id)): Path<(String, String)>,
) -> Result<Json<RevertResponse>, StatusCode> {
    let id = parse_path_id("prompt", &id)?;
    let version_id = parse_path_id("version", &version_id)?;
    let repo = ctx.prompt_repo();
    let versioning = ctx.versioning_service();
    let uc = RevertVersion {
        repo: repo.as_ref(),
        versioning: versioning.as_ref(),
    };
    let outcome = uc.execute(id, version_id).map_err(status_from)?;
    Ok(Json(RevertResponse {
        prompt: to_http_prompt(outcome.prompt),
        version: version_detail_from(outcome.version),
    }))
}

#[utoipa::path(get, path = "/api/prompts/{id}/versions/{version_id}/diff", tag = "Versions",
    params(
        ("id" = Uuid, Path, description = "Prompt ID"),
        ("version_id" = Uuid, Path, description = "Version shown as side B"),
        ("compare" = Option<Uuid>, Query, description = "Version shown as side A (defaults to the previous version)")
    ),
    responses((status = 200, body = VersionDiffResponse), (status = 404, description = "Prompt or version not found")))]
pub async fn diff_versions(
    State(ctx): State<AppContext>,
    Path((id, version_id)): Path<(String, String)>,
    q: Option<Query<CompareQuery>>,
) -> Result<Json<VersionDiffResponse>, StatusCode> {
    let params = q.map(|Query(v)| v).unwrap_or_default();
    let id = parse_path_id("prompt", &id)?;
    let version_id = parse_path_id("version", &version_id)?;
    let compare_to = params
        .compare
        .as_deref()
        .map(|raw| parse_path_id("version", raw))
        .transpose()?;
    let versioning = ctx.versioning_service();
    let uc = CompareVersions {
        versioning: versioning.as_ref(),
    };
    let result = uc
        .execute(id, version_id, compare_to)
        .map_err(status_from)?;
    Ok(Json(VersionDiffResponse::from(result)))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/prompts/:id/versions", get(list_versions))
        .route("/prompts/:id/versions/:version_id", get(get_version))
        .route(
            "/prompts/:id/versions/:version_id/revert",
            post(revert_version),
        )
        .route("/prompts/:id/versions/:version_id/diff", get(diff_versions))
        .with_state(ctx)
}
