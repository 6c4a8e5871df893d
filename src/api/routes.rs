//! HTTP route handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::middleware;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::store::{StoreError, SubTask, Task, TaskBoard, UserStore};

use super::auth::{self, AuthUser};
use super::types::*;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Registered users and their session tokens
    pub users: UserStore,
    /// Tasks and subtasks
    pub board: TaskBoard,
}

/// Map a store error onto the transport status it renders as.
fn error_response(err: StoreError) -> (StatusCode, String) {
    let status = match err {
        StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, err.to_string())
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        config,
        users: UserStore::new(),
        board: TaskBoard::new(),
    });

    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/users", post(create_user));

    let protected_routes = Router::new()
        .route("/api/tasks", post(create_task))
        .route("/api/tasks", get(list_tasks))
        .route("/api/tasks/:id", get(get_task))
        .route("/api/tasks/:id", axum::routing::delete(delete_task))
        .route("/api/tasks/:id/status", patch(update_task_status))
        .route("/api/tasks/:id/subtasks", post(create_subtask))
        .route(
            "/api/tasks/:id/subtasks/:subtask_id/status",
            patch(update_subtask_status),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_session,
        ));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGINT/SIGTERM. Nothing to flush on the way out; the stores are
/// memory-only by design.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Register a new user and issue their session token.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> (StatusCode, Json<CreateUserResponse>) {
    let user = state.users.register(req.username, req.name, req.email).await;
    (
        StatusCode::CREATED,
        Json(CreateUserResponse {
            user_id: user.id,
            session_token: user.session_token,
            username: user.username,
            name: user.name,
            email: user.email,
        }),
    )
}

/// Create a new task owned by the caller.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTaskRequest>,
) -> (StatusCode, Json<Task>) {
    let task = state
        .board
        .create_task(
            user.id,
            req.title,
            req.description,
            req.due_date,
            req.priority.unwrap_or(1),
        )
        .await;
    (StatusCode::CREATED, Json(task))
}

/// List the caller's tasks, keyed by task id.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<HashMap<Uuid, Task>> {
    Json(state.board.list_tasks(user.id).await)
}

/// Get a single task with its subtasks.
async fn get_task(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskDetailResponse>, (StatusCode, String)> {
    let (task, subtasks) = state
        .board
        .get_task(id, user.id)
        .await
        .map_err(error_response)?;
    Ok(Json(TaskDetailResponse { task, subtasks }))
}

/// Delete a task and all of its subtasks.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    state
        .board
        .delete_task(id, user.id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Update a task's status, cascading completion to its subtasks.
async fn update_task_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    state
        .board
        .set_task_status(id, user.id, req.status)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse {
        message: "Task status updated successfully".to_string(),
    }))
}

/// Create a subtask under an existing task.
async fn create_subtask(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateSubTaskRequest>,
) -> Result<(StatusCode, Json<SubTask>), (StatusCode, String)> {
    let subtask = state
        .board
        .create_subtask(
            id,
            user.id,
            req.title,
            req.description,
            req.due_date,
            req.priority.unwrap_or(1),
        )
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(subtask)))
}

/// Update a subtask's status, recomputing the parent task's progress.
async fn update_subtask_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, subtask_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    state
        .board
        .set_subtask_status(id, subtask_id, user.id, req.status)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse {
        message: "Subtask status updated successfully".to_string(),
    }))
}
