//! Code analysis service

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use repo_lint::StyleChecker;

use crate::protocol::{CodeContentRequest, CodeHealthResponse, StyleAnalysisResponse};
use crate::Result;

/// Name reported by the health endpoints.
pub const SERVICE_NAME: &str = "MCP code_analysis_service";

const PREVIEW_CHARS: usize = 100;

/// Routes of the code analysis service.
///
/// Health answers on both `/mcp/code/health` and the bare `/health`.
pub fn router(checker: StyleChecker) -> Router {
    Router::new()
        .route("/mcp/code/analyse_style", post(analyse_style))
        .route("/mcp/code/health", get(health))
        .route("/health", get(health))
        .with_state(checker)
}

async fn analyse_style(
    State(checker): State<StyleChecker>,
    body: std::result::Result<Json<CodeContentRequest>, JsonRejection>,
) -> Result<Json<StyleAnalysisResponse>> {
    let Json(req) = body?;
    tracing::info!(code = %preview(&req.code_content), "Style analysis requested");

    let report = checker.check(&req.code_content).await?;
    tracing::debug!(issues = report.issues().len(), "Style analysis finished");

    Ok(Json(StyleAnalysisResponse {
        success: true,
        message: report.summary().to_string(),
        feedback: report.feedback(),
        issues: report.issues().to_vec(),
    }))
}

async fn health() -> Json<CodeHealthResponse> {
    Json(CodeHealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

fn preview(code: &str) -> String {
    let mut chars = code.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
