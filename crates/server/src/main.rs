// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use rollcall::{CheckinDelta, ProjectionEntry, StateCache};
use rollcall_api::{
    AdminCredential, ApiError, CheckinRequest, ImportRequest, ImportResponse,
    ParticipantsResponse, ResetResponse, UncheckRequest, check_in, export_csv, parse_roster,
    uncheck,
};
use rollcall_domain::{CheckinState, ImportConfig, ParticipantId, Roster};
use rollcall_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

mod live;

use live::{CheckinBroadcaster, LiveEvent, live_events_handler};

/// Rollcall Server - HTTP server for the Rollcall check-in system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 5030)]
    port: u16,

    /// Admin credential required for mutating requests. Falls back to the
    /// `ADMIN_PASSWORD` environment variable; unset means no credential check.
    #[arg(long)]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// The cache mutex is the single exclusion point for mutations: a handler
/// holds it across the durable write, the cache patch, and the broadcast,
/// so events go out in write order per identity.
#[derive(Clone)]
struct AppState {
    /// The durable store (source of truth).
    persistence: Arc<Mutex<Persistence>>,
    /// The in-memory check-in projection.
    cache: Arc<Mutex<StateCache>>,
    /// Fan-out for live check-in events.
    broadcaster: CheckinBroadcaster,
    /// The optionally configured admin credential.
    credential: AdminCredential,
}

/// Query parameters for the participants listing.
#[derive(Debug, Clone, Deserialize)]
struct ParticipantsQuery {
    /// Case-insensitive substring filter over the identity fields and QR code.
    q: Option<String>,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Clone, Deserialize)]
struct ExportQuery {
    /// Either `csv` (default) or `json`.
    format: Option<String>,
}

/// Standard error response payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } | ApiError::InvalidCsvFormat { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ColumnNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::InternalError { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Extracts a bearer token from the request headers.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Verifies the admin credential for a mutating request.
fn verify_admin(state: &AppState, headers: &HeaderMap) -> Result<(), HttpError> {
    state
        .credential
        .verify(bearer_token(headers))
        .map_err(|e| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: e.to_string(),
        })
}

/// Handler for POST `/api/import`.
///
/// Parses the uploaded roster, stores it durably, rebuilds the projection
/// against the surviving check-in snapshot, and notifies live clients.
async fn handle_import(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, HttpError> {
    verify_admin(&state, &headers)?;

    let roster: Roster = parse_roster(&req)?;

    let mut cache = state.cache.lock().await;
    let mut persistence = state.persistence.lock().await;

    persistence.replace_roster(&roster)?;
    let snapshot: HashMap<ParticipantId, CheckinState> = persistence.load_checkins()?;
    cache.rebuild(&roster, &snapshot);

    state.broadcaster.broadcast(&LiveEvent::RosterChanged {
        total: roster.participants.len(),
        reset: false,
    });

    info!(
        total = roster.participants.len(),
        source = %roster.config.source_filename,
        "Imported roster"
    );

    Ok(Json(ImportResponse {
        total: roster.participants.len(),
        config: roster.config,
    }))
}

/// Handler for GET `/api/participants`.
async fn handle_list_participants(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ParticipantsQuery>,
) -> Json<ParticipantsResponse> {
    let cache = state.cache.lock().await;
    let participants: Vec<ProjectionEntry> = cache.list(query.q.as_deref());
    let total: usize = participants.len();

    Json(ParticipantsResponse {
        participants,
        total,
        config: cache.config().clone(),
    })
}

/// Handler for GET `/api/config`.
async fn handle_get_config(AxumState(state): AxumState<AppState>) -> Json<ImportConfig> {
    let cache = state.cache.lock().await;
    Json(cache.config().clone())
}

/// Handler for POST `/api/checkin`.
///
/// The durable write happens first; the cache patch and broadcast follow
/// under the same lock. On a storage failure nothing is patched or sent.
async fn handle_checkin(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CheckinRequest>,
) -> Result<Json<CheckinDelta>, HttpError> {
    verify_admin(&state, &headers)?;

    let delta: CheckinDelta = check_in(&req.participant_id, req.staff.as_deref())?;

    let mut cache = state.cache.lock().await;
    let persistence = state.persistence.lock().await;

    persistence.upsert_checkin(&delta.participant_id, &delta.to_state())?;
    cache.apply_checkin(&delta);
    state.broadcaster.broadcast(&LiveEvent::from_delta(&delta));

    info!(
        participant_id = delta.participant_id.value(),
        staff = delta.checked_by.as_deref().unwrap_or_default(),
        "Checked in participant"
    );

    Ok(Json(delta))
}

/// Handler for POST `/api/uncheck`.
async fn handle_uncheck(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<UncheckRequest>,
) -> Result<Json<CheckinDelta>, HttpError> {
    verify_admin(&state, &headers)?;

    let delta: CheckinDelta = uncheck(&req.participant_id)?;

    let mut cache = state.cache.lock().await;
    let persistence = state.persistence.lock().await;

    persistence.upsert_checkin(&delta.participant_id, &delta.to_state())?;
    cache.apply_checkin(&delta);
    state.broadcaster.broadcast(&LiveEvent::from_delta(&delta));

    info!(
        participant_id = delta.participant_id.value(),
        "Unchecked participant"
    );

    Ok(Json(delta))
}

/// Handler for GET `/api/export`.
///
/// Renders the full projection as a CSV attachment by default, or as JSON
/// when `?format=json` is given.
async fn handle_export(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, HttpError> {
    let cache = state.cache.lock().await;
    let entries: Vec<ProjectionEntry> = cache.list(None);

    match query.format.as_deref().unwrap_or("csv") {
        "json" => Ok(Json(entries).into_response()),
        "csv" => {
            let csv_text: String = export_csv(&entries, cache.config())?;
            let headers = [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"checkin_export.csv\"",
                ),
            ];
            Ok((headers, csv_text).into_response())
        }
        other => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid export format: '{other}'. Must be 'csv' or 'json'"),
        }),
    }
}

/// Handler for POST `/api/reset`.
///
/// Deletes every durable check-in row and rebuilds the projection with an
/// empty snapshot. The roster itself is untouched.
async fn handle_reset(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResetResponse>, HttpError> {
    verify_admin(&state, &headers)?;

    let mut cache = state.cache.lock().await;
    let persistence = state.persistence.lock().await;

    let deleted: usize = persistence.reset_checkins()?;
    let roster: Roster = persistence.load_roster()?.unwrap_or_else(Roster::empty);
    cache.rebuild(&roster, &HashMap::new());

    state.broadcaster.broadcast(&LiveEvent::RosterChanged {
        total: roster.participants.len(),
        reset: true,
    });

    info!(deleted, "Reset all check-ins");

    Ok(Json(ResetResponse { deleted }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/import", post(handle_import))
        .route("/api/participants", get(handle_list_participants))
        .route("/api/config", get(handle_get_config))
        .route("/api/checkin", post(handle_checkin))
        .route("/api/uncheck", post(handle_uncheck))
        .route("/api/export", get(handle_export))
        .route("/api/reset", post(handle_reset))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rollcall Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Rebuild the projection from durable state
    let roster: Roster = persistence.load_roster()?.unwrap_or_else(Roster::empty);
    let snapshot: HashMap<ParticipantId, CheckinState> = persistence.load_checkins()?;
    let mut cache: StateCache = StateCache::new();
    cache.rebuild(&roster, &snapshot);
    info!(
        participants = cache.len(),
        checkins = snapshot.len(),
        "Restored state from durable store"
    );

    let credential: AdminCredential = AdminCredential::new(
        args.admin_password
            .or_else(|| std::env::var("ADMIN_PASSWORD").ok()),
    );
    if credential.is_configured() {
        info!("Admin credential configured; mutating requests require it");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        cache: Arc::new(Mutex::new(cache)),
        broadcaster: CheckinBroadcaster::new(),
        credential,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
