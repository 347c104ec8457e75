//! DTOs for API requests and responses.
//!
//! Field names follow the wire contract of the scheduling endpoint
//! (snake_case JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Employee, Product};
use crate::extract::{OptimizationResult, OptimizationStats, ScheduleEntry, TaskBreakdown};

/// Request body for the scheduling endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub products: Vec<Product>,
    /// Reserved input: accepted and deserialized as opaque JSON but not
    /// consumed by the optimizer.
    #[serde(default)]
    pub resources: Vec<serde_json::Value>,
    /// Reserved input: accepted and deserialized as opaque JSON but not
    /// consumed by the optimizer.
    #[serde(default)]
    pub constraints: Vec<serde_json::Value>,
}

/// Successful scheduling response.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub success: bool,
    pub schedule: Vec<ScheduleEntry>,
    pub task_breakdown: TaskBreakdown,
    pub optimization_stats: OptimizationStats,
    pub timestamp: DateTime<Utc>,
}

impl OptimizeResponse {
    pub fn from_result(result: OptimizationResult) -> Self {
        Self {
            success: true,
            schedule: result.schedule,
            task_breakdown: result.task_breakdown,
            optimization_stats: result.optimization_stats,
            timestamp: Utc::now(),
        }
    }
}

/// Structured failure payload returned with a non-2xx status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub traceback: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, traceback: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            traceback: traceback.into(),
        }
    }
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub engine_available: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::OptimizationStats;
    use std::collections::BTreeMap;

    #[test]
    fn test_request_defaults_for_missing_fields() {
        let request: OptimizeRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(request.employees.is_empty());
        assert!(request.products.is_empty());
        assert!(request.resources.is_empty());
        assert!(request.constraints.is_empty());
    }

    #[test]
    fn test_request_parses_full_payload() {
        let body = r#"{
            "employees": [
                {"employee_id": "E001", "name": "Nora Vance", "department": "Assembly"}
            ],
            "products": [
                {"product_code": "P001", "name": "Gear Housing", "priority": 2, "batch_time": 4.5}
            ],
            "resources": [{"resource_id": "R1"}],
            "constraints": [{"type": "max_hours", "value": 40}]
        }"#;

        let request: OptimizeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.employees.len(), 1);
        assert_eq!(request.employees[0].employee_id, "E001");
        assert_eq!(request.products[0].priority, 2);
        assert_eq!(request.products[0].batch_time, 4.5);
        assert_eq!(request.resources.len(), 1);
        assert_eq!(request.constraints.len(), 1);
    }

    #[test]
    fn test_product_batch_time_defaults_to_zero() {
        let body = r#"{"products": [{"product_code": "P001", "name": "Gear Housing", "priority": 1}]}"#;
        let request: OptimizeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.products[0].batch_time, 0.0);
    }

    #[test]
    fn test_response_serialization_shape() {
        let result = OptimizationResult {
            schedule: Vec::new(),
            task_breakdown: BTreeMap::new(),
            optimization_stats: OptimizationStats {
                total_assignments: 0,
                solver_status: "UNKNOWN".to_string(),
                solve_time_seconds: 0.0,
                employees_utilized: 0,
                products_scheduled: 0,
                days_covered: 0,
            },
        };

        let value = serde_json::to_value(OptimizeResponse::from_result(result)).unwrap();
        assert_eq!(value["success"], true);
        assert!(value["schedule"].as_array().unwrap().is_empty());
        assert_eq!(value["optimization_stats"]["solver_status"], "UNKNOWN");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_error_response_shape() {
        let value =
            serde_json::to_value(ErrorResponse::new("boom", "at solver.rs:1")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "boom");
        assert_eq!(value["traceback"], "at solver.rs:1");
    }
}
