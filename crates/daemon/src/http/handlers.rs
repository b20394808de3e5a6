// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route handlers. Each one is a thin translation onto the engine.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use sr_core::ExecutionId;

use super::error::{ApiError, ApiResult};
use super::{pages, AppState};

/// Multipart field carrying the uploaded script.
const SCRIPT_FIELD: &str = "script";

#[derive(Debug, Deserialize)]
pub struct CommandForm {
    #[serde(default)]
    pub command: String,
}

#[derive(Debug, Deserialize)]
pub struct OutputQuery {
    pub id: Option<String>,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::index(&state.engine.registry().entries()))
}

pub async fn command_form(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::command_form(&state.engine.registry().entries()))
}

pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Html<String>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {}", e.body_text())))?
    {
        if field.name() != Some(SCRIPT_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().filter(|n| !n.is_empty()).map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {}", e.body_text())))?;
        upload = Some((name, bytes));
        break;
    }

    let Some((name, bytes)) = upload else {
        return Err(ApiError::BadRequest("No file uploaded.".to_string()));
    };
    let id = state.engine.spawn_script(&bytes, &name).await?;
    Ok(Html(pages::script_started(&name, id)))
}

pub async fn run_command(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CommandForm>,
) -> ApiResult<Html<String>> {
    let id = state.engine.spawn_command(&form.command).await?;
    Ok(Html(pages::command_started(&form.command, id)))
}

pub async fn stop(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Html<String>> {
    let id = raw_id.parse::<ExecutionId>().map_err(|_| ApiError::script_not_found())?;
    state.engine.terminate(id)?;
    Ok(Html(pages::stopped(id)))
}

/// Single log when `id` names a stored record, otherwise every log.
pub async fn output(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OutputQuery>,
) -> Html<String> {
    let record = query
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<ExecutionId>().ok())
        .and_then(|id| state.engine.read_log(id).ok());

    match record {
        Some(record) => Html(pages::single_log(&record)),
        None => Html(pages::all_logs(&state.engine.logs().read_all())),
    }
}
