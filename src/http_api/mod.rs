use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::calculations::mutations::{self, Edit, EditOutcome};
use crate::export;
use crate::grid::{self, MonthGrid};
use crate::metadata::ScheduleMetadata;
use crate::phase::Phase;
use crate::schedule::{RefreshSummary, Schedule};

#[derive(Clone)]
pub struct AppState {
    schedule: Arc<RwLock<Schedule>>,
}

impl AppState {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule: Arc::new(RwLock::new(schedule)),
        }
    }

    pub fn with_shared(schedule: Arc<RwLock<Schedule>>) -> Self {
        Self { schedule }
    }

    fn schedule(&self) -> Arc<RwLock<Schedule>> {
        self.schedule.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Conflict(message) => {
                let body = Json(ErrorBody {
                    error: "conflict",
                    message,
                });
                (StatusCode::CONFLICT, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovePayload {
    name: String,
    start: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct ResizePayload {
    name: String,
    workdays: i64,
}

#[derive(Debug, Deserialize)]
struct ReorderPayload {
    from: usize,
    to: usize,
}

#[derive(Debug, Serialize)]
struct EditResponse {
    changed: bool,
    phases: Vec<Phase>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metadata", get(get_metadata).put(update_metadata))
        .route("/phases", get(list_phases).post(create_phase))
        .route(
            "/phases/:name",
            get(get_phase).put(update_phase).delete(delete_phase),
        )
        .route("/edits/move", post(move_phase))
        .route("/edits/resize", post(resize_phase))
        .route("/edits/reorder", post(reorder_phases))
        .route("/refresh", post(refresh_schedule))
        .route("/grid/:year/:month", get(get_month_grid))
        .route("/export/ics", get(export_ics))
        .route("/export/html", get(export_html))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, schedule: Schedule) -> std::io::Result<()> {
    let state = AppState::new(schedule);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_metadata(State(state): State<AppState>) -> Json<ScheduleMetadata> {
    let schedule = state.schedule();
    let metadata = {
        let guard = schedule.read();
        guard.metadata().clone()
    };
    Json(metadata)
}

async fn update_metadata(
    State(state): State<AppState>,
    Json(metadata): Json<ScheduleMetadata>,
) -> Json<ScheduleMetadata> {
    let schedule = state.schedule();
    let current = {
        let mut guard = schedule.write();
        guard.set_metadata(metadata);
        guard.refresh();
        guard.metadata().clone()
    };
    Json(current)
}

async fn list_phases(State(state): State<AppState>) -> Json<Vec<Phase>> {
    let schedule = state.schedule();
    let phases = {
        let guard = schedule.read();
        guard.phases().to_vec()
    };
    Json(phases)
}

async fn get_phase(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Phase>, ApiError> {
    let schedule = state.schedule();
    let result = {
        let guard = schedule.read();
        guard.find_phase(&name).map(|(_, phase)| phase.clone())
    };
    match result {
        Some(phase) => Ok(Json(phase)),
        None => Err(ApiError::not_found(format!("phase '{name}' not found"))),
    }
}

async fn create_phase(
    State(state): State<AppState>,
    Json(phase): Json<Phase>,
) -> Result<(StatusCode, Json<Phase>), ApiError> {
    if phase.workdays < 0 {
        return Err(ApiError::invalid("workdays must be non-negative"));
    }
    let schedule = state.schedule();
    let created = {
        let mut guard = schedule.write();
        if guard.find_phase(&phase.name).is_some() {
            return Err(ApiError::Conflict(format!(
                "phase '{}' already exists",
                phase.name
            )));
        }
        let name = phase.name.clone();
        guard.upsert_phase(phase);
        guard
            .find_phase(&name)
            .map(|(_, phase)| phase.clone())
            .ok_or_else(|| ApiError::invalid("phase not found after creation"))?
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_phase(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(phase): Json<Phase>,
) -> Result<Json<Phase>, ApiError> {
    if phase.name != name {
        return Err(ApiError::invalid(
            "phase name in payload does not match path parameter",
        ));
    }
    if phase.workdays < 0 {
        return Err(ApiError::invalid("workdays must be non-negative"));
    }
    let schedule = state.schedule();
    let updated = {
        let mut guard = schedule.write();
        if guard.find_phase(&name).is_none() {
            return Err(ApiError::not_found(format!("phase '{name}' not found")));
        }
        guard.upsert_phase(phase);
        guard
            .find_phase(&name)
            .map(|(_, phase)| phase.clone())
            .ok_or_else(|| ApiError::invalid("phase not found after update"))?
    };
    Ok(Json(updated))
}

async fn delete_phase(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let schedule = state.schedule();
    let removed = {
        let mut guard = schedule.write();
        guard.remove_phase(&name)
    };
    if !removed {
        return Err(ApiError::not_found(format!("phase '{name}' not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn apply_edit(schedule: &Arc<RwLock<Schedule>>, edit: Edit) -> Result<EditResponse, ApiError> {
    let mut guard = schedule.write();
    let outcome =
        mutations::apply(&*guard, edit).map_err(|err| ApiError::invalid(err.to_string()))?;
    let changed = outcome.is_changed();
    if let EditOutcome::Changed(updated) = outcome {
        *guard = updated;
    }
    Ok(EditResponse {
        changed,
        phases: guard.phases().to_vec(),
    })
}

fn resolve_phase_index(schedule: &Arc<RwLock<Schedule>>, name: &str) -> Result<usize, ApiError> {
    let guard = schedule.read();
    guard
        .find_phase(name)
        .map(|(index, _)| index)
        .ok_or_else(|| ApiError::not_found(format!("phase '{name}' not found")))
}

async fn move_phase(
    State(state): State<AppState>,
    Json(payload): Json<MovePayload>,
) -> Result<Json<EditResponse>, ApiError> {
    let schedule = state.schedule();
    let index = resolve_phase_index(&schedule, &payload.name)?;
    let response = apply_edit(
        &schedule,
        Edit::Move {
            index,
            start: payload.start,
        },
    )?;
    Ok(Json(response))
}

async fn resize_phase(
    State(state): State<AppState>,
    Json(payload): Json<ResizePayload>,
) -> Result<Json<EditResponse>, ApiError> {
    let schedule = state.schedule();
    let index = resolve_phase_index(&schedule, &payload.name)?;
    let response = apply_edit(
        &schedule,
        Edit::Resize {
            index,
            workdays: payload.workdays,
        },
    )?;
    Ok(Json(response))
}

async fn reorder_phases(
    State(state): State<AppState>,
    Json(payload): Json<ReorderPayload>,
) -> Result<Json<EditResponse>, ApiError> {
    let schedule = state.schedule();
    let response = apply_edit(
        &schedule,
        Edit::Reorder {
            from: payload.from,
            to: payload.to,
        },
    )?;
    Ok(Json(response))
}

async fn refresh_schedule(State(state): State<AppState>) -> Json<RefreshSummary> {
    let schedule = state.schedule();
    let summary = {
        let mut guard = schedule.write();
        guard.refresh()
    };
    Json(summary)
}

async fn get_month_grid(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthGrid>, ApiError> {
    let schedule = state.schedule();
    let grid = {
        let guard = schedule.read();
        grid::month_grid(year, month, guard.phases())
    };
    match grid {
        Some(grid) => Ok(Json(grid)),
        None => Err(ApiError::invalid(format!("invalid month {year}-{month}"))),
    }
}

async fn export_ics(State(state): State<AppState>) -> impl IntoResponse {
    let schedule = state.schedule();
    let body = {
        let guard = schedule.read();
        export::schedule_to_ics(&guard)
    };
    ([(header::CONTENT_TYPE, "text/calendar; charset=utf-8")], body)
}

async fn export_html(State(state): State<AppState>) -> impl IntoResponse {
    let schedule = state.schedule();
    let body = {
        let guard = schedule.read();
        export::schedule_to_html(&guard)
    };
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body)
}
