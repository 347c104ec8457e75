//! Solver invocation: a thin seam over the MILP engine.
//!
//! Assembles the assignment model, constraints, and objective into a
//! maximization problem, solves it on a dedicated thread under a wall-clock
//! cap, and reports a typed status. Non-success statuses are results, not
//! errors.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use good_lp::{default_solver, Constraint, Expression, ResolutionError, Solution, SolverModel};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Employee, PhaseCatalog, Product, WeekGrid};
use crate::extract::{self, OptimizationResult};
use crate::model::{AssignmentModel, VarKey};

/// Default solving time: 30 seconds.
const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// Solver configuration, injected at construction time.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Wall-clock cap for one solve.
    pub time_limit: Duration,
    /// Whether the optimization engine may be invoked at all. When false,
    /// every solve reports `SolveError::EngineUnavailable` without being
    /// attempted.
    pub engine_available: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
            engine_available: true,
        }
    }
}

/// Terminal status of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    /// Objective provably maximal.
    Optimal,
    /// Valid solution without an optimality proof. The one-shot engine in
    /// use never surfaces an incumbent at cutoff, so this status is kept
    /// for the wire contract and for engines that do.
    Feasible,
    /// No satisfying assignment exists. Cannot occur while the all-false
    /// assignment stays feasible; informative if future constraints change
    /// that.
    Infeasible,
    /// Time cap elapsed or the engine failed without a solution.
    Unknown,
}

impl SolverStatus {
    /// Returns the status as a SCREAMING_SNAKE_CASE string for API responses.
    ///
    /// ```
    /// use production_scheduling::solver::SolverStatus;
    ///
    /// assert_eq!(SolverStatus::Optimal.as_str(), "OPTIMAL");
    /// assert_eq!(SolverStatus::Unknown.as_str(), "UNKNOWN");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::Unknown => "UNKNOWN",
        }
    }

    /// Only OPTIMAL and FEASIBLE outcomes carry a schedule.
    pub fn has_schedule(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

/// Errors from the solver seam. Solver non-success statuses are not errors
/// and are reported through `SolveOutcome` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("optimization engine is not available")]
    EngineUnavailable,
}

/// What one solve produced.
#[derive(Debug)]
pub struct SolveOutcome {
    pub status: SolverStatus,
    /// Keys of variables solved to true. Empty unless `status.has_schedule()`.
    pub selected: Vec<VarKey>,
    pub wall_time: Duration,
}

/// Solves the assembled problem under the configured wall-clock cap.
///
/// The engine runs on its own thread; the caller blocks on the result for
/// at most `config.time_limit`. There is no cancellation path beyond the
/// cap: an overrunning engine thread is left to finish against a closed
/// channel.
pub fn solve(
    model: AssignmentModel,
    constraints: Vec<Constraint>,
    objective: Expression,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    if !config.engine_available {
        return Err(SolveError::EngineUnavailable);
    }

    let (vars, by_key) = model.into_parts();
    let entries: Vec<_> = by_key.into_iter().collect();

    let mut problem = vars.maximise(objective).using(default_solver);
    for c in constraints {
        problem = problem.with(c);
    }

    let (tx, rx) = mpsc::channel();
    let started = Instant::now();

    thread::spawn(move || {
        let result = problem.solve().map(|solution| {
            entries
                .iter()
                .filter(|(_, var)| solution.value(*var) > 0.5)
                .map(|(key, _)| *key)
                .collect::<Vec<_>>()
        });
        let _ = tx.send(result);
    });

    let outcome = match rx.recv_timeout(config.time_limit) {
        Ok(Ok(selected)) => SolveOutcome {
            status: SolverStatus::Optimal,
            selected,
            wall_time: started.elapsed(),
        },
        Ok(Err(ResolutionError::Infeasible)) => SolveOutcome {
            status: SolverStatus::Infeasible,
            selected: Vec::new(),
            wall_time: started.elapsed(),
        },
        Ok(Err(err)) => {
            warn!("engine returned no solution: {err}");
            SolveOutcome {
                status: SolverStatus::Unknown,
                selected: Vec::new(),
                wall_time: started.elapsed(),
            }
        }
        Err(_) => {
            warn!(
                time_limit_secs = config.time_limit.as_secs_f64(),
                "time cap elapsed before the engine finished"
            );
            SolveOutcome {
                status: SolverStatus::Unknown,
                selected: Vec::new(),
                wall_time: started.elapsed(),
            }
        }
    };

    Ok(outcome)
}

/// The workforce-scheduling optimizer.
///
/// One call to [`Scheduler::optimize`] runs the full
/// build → constrain → compose → solve → extract sequence synchronously.
/// No state is shared across requests.
pub struct Scheduler {
    config: SolverConfig,
}

impl Scheduler {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs one optimization request to completion or to the time cap.
    ///
    /// `week_start` anchors day index 0 when reconstructing timestamps.
    pub fn optimize(
        &self,
        employees: &[Employee],
        products: &[Product],
        catalog: &PhaseCatalog,
        grid: WeekGrid,
        week_start: chrono::NaiveDate,
    ) -> Result<OptimizationResult, SolveError> {
        if !self.config.engine_available {
            return Err(SolveError::EngineUnavailable);
        }

        let model = AssignmentModel::build(employees, products, catalog, grid);
        debug!(
            variables = model.variable_count(),
            employees = employees.len(),
            products = products.len(),
            "assignment model built"
        );

        let constraints = crate::constraints::install_slot_constraints(&model);
        let objective = crate::constraints::compose_objective(&model, products);

        let outcome = solve(model, constraints, objective, &self.config)?;
        debug!(
            status = outcome.status.as_str(),
            assignments = outcome.selected.len(),
            wall_time_secs = outcome.wall_time.as_secs_f64(),
            "solve finished"
        );

        Ok(extract::extract(
            &outcome, employees, products, catalog, week_start,
        ))
    }
}
