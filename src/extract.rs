//! Result extraction and per-day analytics.
//!
//! Walks the satisfied assignment, reconstructs absolute UTC timestamps
//! from the week grid, and emits the flat schedule plus a day-keyed
//! breakdown with aggregate counters.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::{Employee, PhaseCatalog, Product};
use crate::solver::SolveOutcome;

/// One materialized assignment in the output schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub employee_id: String,
    pub product_code: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub notes: String,
    pub task_phase: String,
    pub task_description: String,
    pub duration_hours: f64,
}

/// Compact per-assignment summary used in the day-keyed breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub employee: String,
    pub product: String,
    pub phase: String,
    /// Start of the hour slot as "HH:MM".
    pub start_time: String,
    pub duration: f64,
    pub priority: i32,
}

/// Breakdown entries grouped by "YYYY-MM-DD" date key.
pub type TaskBreakdown = BTreeMap<String, Vec<BreakdownEntry>>;

/// Aggregate counters over one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationStats {
    pub total_assignments: usize,
    pub solver_status: String,
    pub solve_time_seconds: f64,
    pub employees_utilized: usize,
    pub products_scheduled: usize,
    pub days_covered: usize,
}

/// Everything the extractor produces for one request.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub schedule: Vec<ScheduleEntry>,
    pub task_breakdown: TaskBreakdown,
    pub optimization_stats: OptimizationStats,
}

/// Monday of the week containing `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use production_scheduling::extract::monday_of_week;
///
/// let thursday = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
/// assert_eq!(monday_of_week(thursday), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
///
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(monday_of_week(monday), monday);
/// ```
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Materializes schedule entries, the day-keyed breakdown, and stats from a
/// solve outcome.
///
/// Employee and product lookups fall back to a raw index identifier when a
/// key points outside the roster; extraction never fails. The schedule list
/// follows the unordered iteration over selected variables and callers must
/// not depend on its order.
pub fn extract(
    outcome: &SolveOutcome,
    employees: &[Employee],
    products: &[Product],
    catalog: &PhaseCatalog,
    week_start: NaiveDate,
) -> OptimizationResult {
    let mut schedule = Vec::with_capacity(outcome.selected.len());
    let mut task_breakdown = TaskBreakdown::new();

    let mut employees_used = HashSet::new();
    let mut products_used = HashSet::new();
    let mut days_covered = HashSet::new();

    for key in &outcome.selected {
        let Some(phase) = catalog.get(key.phase) else {
            continue;
        };

        let date = week_start + Duration::days(key.day as i64);
        let Some(start_naive) = date.and_hms_opt(key.hour, 0, 0) else {
            continue;
        };
        let start = start_naive.and_utc();
        let end = start + Duration::minutes(phase.duration_minutes);

        let employee = employees.get(key.employee);
        let product = products.get(key.product);

        let employee_id = employee
            .map(|e| e.employee_id.clone())
            .unwrap_or_else(|| format!("employee-{}", key.employee));
        let employee_name = employee
            .map(|e| e.name.clone())
            .unwrap_or_else(|| employee_id.clone());
        let department = employee.map(|e| e.department.as_str()).unwrap_or("unknown");

        let product_code = product
            .map(|p| p.product_code.clone())
            .unwrap_or_else(|| format!("product-{}", key.product));
        let product_name = product
            .map(|p| p.name.clone())
            .unwrap_or_else(|| product_code.clone());
        let priority = product.map(|p| p.priority).unwrap_or(0);

        let notes = format!(
            "Phase: {} ({})\nProduct: {} ({})\nEmployee: {} ({})\nPriority: {}, duration {:.2}h",
            phase.id,
            phase.description,
            product_name,
            product_code,
            employee_name,
            department,
            priority,
            phase.duration_hours(),
        );

        employees_used.insert(employee_id.clone());
        products_used.insert(product_code.clone());
        days_covered.insert(date);

        task_breakdown
            .entry(date.format("%Y-%m-%d").to_string())
            .or_default()
            .push(BreakdownEntry {
                employee: employee_name,
                product: product_name.clone(),
                phase: phase.id.clone(),
                start_time: format!("{:02}:00", key.hour),
                duration: phase.duration_hours(),
                priority,
            });

        schedule.push(ScheduleEntry {
            employee_id,
            product_code,
            start_time: start,
            end_time: end,
            status: "scheduled".to_string(),
            notes,
            task_phase: phase.id.clone(),
            task_description: phase.description.clone(),
            duration_hours: phase.duration_hours(),
        });
    }

    let optimization_stats = OptimizationStats {
        total_assignments: schedule.len(),
        solver_status: outcome.status.as_str().to_string(),
        solve_time_seconds: outcome.wall_time.as_secs_f64(),
        employees_utilized: employees_used.len(),
        products_scheduled: products_used.len(),
        days_covered: days_covered.len(),
    };

    OptimizationResult {
        schedule,
        task_breakdown,
        optimization_stats,
    }
}
