//! REST API handlers
//!
//! Whole-school endpoints: health and status, snapshot, conflicts, lesson moves
//! and placement checks, weekly grids, import/export and reset.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};
use chrono::Local;

use engine::{Mutation, Outcome, Placement, StoreGateway, Verdict, WeeklyGrid};
use shared::{ClassId, Conflict, Lesson, LessonId, ProcessId, Snapshot, TeacherId, process_info};

use super::unexpected;
use crate::error::WebServerResult;
use crate::types::{
    HealthResponse, MessageResponse, MoveRequest, StatusResponse, backup_file_name,
};
use crate::web::{ApiJson, ApiPath, ApiQuery};
use crate::webserver_impl::WebServer;

/// GET /health
pub async fn health<G>(State(server): State<WebServer<G>>) -> Json<HealthResponse>
where
    G: StoreGateway + 'static,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: server.state().uptime_seconds(),
        mutations: server.engine().mutation_count(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/status
pub async fn status<G>(State(server): State<WebServer<G>>) -> Json<StatusResponse>
where
    G: StoreGateway + 'static,
{
    let engine = server.engine();
    Json(StatusResponse {
        summary: engine.summary().await,
        store: engine.gateway().describe(),
        placement_policy: engine.config().placement_policy,
    })
}

/// GET /api/snapshot
pub async fn snapshot<G>(State(server): State<WebServer<G>>) -> Json<Snapshot>
where
    G: StoreGateway + 'static,
{
    Json(server.engine().snapshot().await)
}

/// GET /api/conflicts
pub async fn conflicts<G>(State(server): State<WebServer<G>>) -> Json<Vec<Conflict>>
where
    G: StoreGateway + 'static,
{
    Json(server.engine().conflicts().await)
}

/// PUT /api/lessons/{id}/move
pub async fn move_lesson<G>(
    State(server): State<WebServer<G>>,
    ApiPath(id): ApiPath<LessonId>,
    ApiJson(target): ApiJson<MoveRequest>,
) -> WebServerResult<Json<Lesson>>
where
    G: StoreGateway + 'static,
{
    let mutation = Mutation::MoveLesson {
        id,
        weekday: target.weekday,
        period: target.period,
    };

    match server.engine().commit(mutation).await? {
        Outcome::Moved(lesson) => Ok(Json(lesson)),
        other => Err(unexpected(other)),
    }
}

/// POST /api/lessons/validate
pub async fn validate_lesson<G>(
    State(server): State<WebServer<G>>,
    ApiJson(candidate): ApiJson<Placement>,
) -> Json<Verdict>
where
    G: StoreGateway + 'static,
{
    Json(server.engine().validate(&candidate).await)
}

/// GET /api/lessons/{id}/validate-move?weekday=&period=
pub async fn validate_move<G>(
    State(server): State<WebServer<G>>,
    ApiPath(id): ApiPath<LessonId>,
    ApiQuery(target): ApiQuery<MoveRequest>,
) -> WebServerResult<Json<Verdict>>
where
    G: StoreGateway + 'static,
{
    let verdict = server
        .engine()
        .validate_move(id, target.weekday, target.period)
        .await?;
    Ok(Json(verdict))
}

/// GET /api/classes/{id}/grid
pub async fn class_grid<G>(
    State(server): State<WebServer<G>>,
    ApiPath(id): ApiPath<ClassId>,
) -> WebServerResult<Json<WeeklyGrid>>
where
    G: StoreGateway + 'static,
{
    Ok(Json(server.engine().class_grid(id).await?))
}

/// GET /api/teachers/{id}/grid
pub async fn teacher_grid<G>(
    State(server): State<WebServer<G>>,
    ApiPath(id): ApiPath<TeacherId>,
) -> WebServerResult<Json<WeeklyGrid>>
where
    G: StoreGateway + 'static,
{
    Ok(Json(server.engine().teacher_grid(id).await?))
}

/// POST /api/import
///
/// The body replaces the whole school. Conflicts in the body are ignored and
/// derived again from the imported lessons.
pub async fn import<G>(
    State(server): State<WebServer<G>>,
    ApiJson(snapshot): ApiJson<Snapshot>,
) -> WebServerResult<Json<MessageResponse>>
where
    G: StoreGateway + 'static,
{
    match server.engine().commit(Mutation::Replace(snapshot)).await? {
        Outcome::Replaced(summary) => {
            process_info!(ProcessId::current(), "📥 Imported timetable ({})", summary);
            Ok(Json(MessageResponse::ok("Data imported successfully")))
        }
        other => Err(unexpected(other)),
    }
}

/// GET /api/export
pub async fn export<G>(State(server): State<WebServer<G>>) -> impl IntoResponse
where
    G: StoreGateway + 'static,
{
    let snapshot = server.engine().snapshot().await;
    let disposition = format!(
        "attachment; filename={}",
        backup_file_name(Local::now().date_naive())
    );

    ([(header::CONTENT_DISPOSITION, disposition)], Json(snapshot))
}

/// DELETE /api/reset
pub async fn reset<G>(State(server): State<WebServer<G>>) -> WebServerResult<Json<MessageResponse>>
where
    G: StoreGateway + 'static,
{
    let summary = server.engine().reset().await?;
    Ok(Json(MessageResponse::ok(format!(
        "Timetable reset to defaults ({summary})"
    ))))
}
