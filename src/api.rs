//! REST API handlers for production scheduling.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::demo_data::{self, DemoData};
use crate::domain::{PhaseCatalog, WeekGrid};
use crate::dto::{ErrorResponse, HealthResponse, OptimizeRequest, OptimizeResponse};
use crate::extract::monday_of_week;
use crate::solver::{Scheduler, SolveError, SolverConfig};

/// Application state shared across handlers.
///
/// Holds only the injected solver configuration; requests share no mutable
/// state.
pub struct AppState {
    pub solver_config: SolverConfig,
}

impl AppState {
    pub fn new(solver_config: SolverConfig) -> Self {
        Self { solver_config }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

/// Creates the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // Demo data
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", get(get_demo_data))
        // Scheduling
        .route("/optimize-schedule", post(optimize_schedule))
        .with_state(state)
}

// ============================================================================
// Health & demo data
// ============================================================================

/// GET /health - Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        engine_available: state.solver_config.engine_available,
        timestamp: Utc::now(),
    })
}

/// GET /demo-data - List available demo data sets.
async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list_demo_data())
}

/// GET /demo-data/{id} - Get a specific demo roster.
async fn get_demo_data(
    Path(id): Path<String>,
) -> Result<Json<demo_data::DemoRoster>, StatusCode> {
    match id.parse::<DemoData>() {
        Ok(demo) => Ok(Json(demo_data::generate(demo))),
        Err(_) => Err(StatusCode::NOT_FOUND),
    }
}

// ============================================================================
// Scheduling
// ============================================================================

/// POST /optimize-schedule - Run one build-solve-extract sequence.
///
/// Solver non-success statuses still return a 2xx response with an empty
/// schedule; only engine unavailability and internal faults map to error
/// statuses, always with the structured failure payload.
async fn optimize_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OptimizeRequest>,
) -> Response {
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        employees = request.employees.len(),
        products = request.products.len(),
        "optimization requested"
    );
    if !request.resources.is_empty() || !request.constraints.is_empty() {
        // Reserved inputs: accepted but not consumed.
        tracing::debug!(%request_id, "ignoring reserved resources/constraints fields");
    }

    let config = state.solver_config;
    let joined = tokio::task::spawn_blocking(move || {
        let scheduler = Scheduler::new(config);
        let week_start = monday_of_week(Utc::now().date_naive());
        scheduler.optimize(
            &request.employees,
            &request.products,
            &PhaseCatalog::default(),
            WeekGrid::default(),
            week_start,
        )
    })
    .await;

    match joined {
        Ok(Ok(result)) => {
            tracing::info!(
                %request_id,
                assignments = result.optimization_stats.total_assignments,
                status = %result.optimization_stats.solver_status,
                "optimization finished"
            );
            (StatusCode::OK, Json(OptimizeResponse::from_result(result))).into_response()
        }
        Ok(Err(err)) => {
            let status = match err {
                SolveError::EngineUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            };
            tracing::error!(%request_id, "{err}");
            (
                status,
                Json(ErrorResponse::new(err.to_string(), format!("{err:?}"))),
            )
                .into_response()
        }
        Err(join_err) => {
            tracing::error!(%request_id, "optimization task failed: {join_err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "optimization task failed",
                    format!("{join_err:?}"),
                )),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(Arc::new(AppState::default()))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        // Rejection bodies are plain text; treat anything unparseable as null.
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_engine_availability() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["engine_available"], true);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_optimize_small_roster() {
        let body = r#"{
            "employees": [
                {"employee_id": "E001", "name": "Nora Vance", "department": "Assembly"}
            ],
            "products": [
                {"product_code": "P001", "name": "Gear Housing", "priority": 5, "batch_time": 4.0}
            ],
            "resources": [],
            "constraints": []
        }"#;

        let (status, body) = send(test_router(), json_post("/optimize-schedule", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let schedule = body["schedule"].as_array().unwrap();
        assert_eq!(
            body["optimization_stats"]["total_assignments"].as_u64().unwrap() as usize,
            schedule.len()
        );
        let solver_status = body["optimization_stats"]["solver_status"].as_str().unwrap();
        assert!(solver_status == "OPTIMAL" || solver_status == "FEASIBLE");
    }

    #[tokio::test]
    async fn test_optimize_empty_payload_succeeds() {
        let (status, body) = send(test_router(), json_post("/optimize-schedule", "{}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["schedule"].as_array().unwrap().is_empty());
        assert!(body["optimization_stats"]["solver_status"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_client_error() {
        let (status, _) = send(test_router(), json_post("/optimize-schedule", "{not json")).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_unavailable_engine_maps_to_service_unavailable() {
        let state = Arc::new(AppState::new(SolverConfig {
            engine_available: false,
            ..SolverConfig::default()
        }));
        let (status, body) = send(router(state), json_post("/optimize-schedule", "{}")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("not available"));
    }

    #[tokio::test]
    async fn test_demo_data_endpoints() {
        let request = Request::builder()
            .uri("/demo-data")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["SMALL", "LARGE"]));

        let request = Request::builder()
            .uri("/demo-data/small")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employees"].as_array().unwrap().len(), 4);

        let request = Request::builder()
            .uri("/demo-data/unknown")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(test_router(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
