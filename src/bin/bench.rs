//! Benchmark for model build and solve wall time.
//!
//! Run with: cargo run --release --bin bench

use std::time::Instant;

use production_scheduling::constraints::{compose_objective, install_slot_constraints};
use production_scheduling::demo_data::{self, DemoData};
use production_scheduling::domain::{PhaseCatalog, WeekGrid};
use production_scheduling::model::AssignmentModel;
use production_scheduling::solver::{solve, SolverConfig};

fn main() {
    let roster = demo_data::generate(DemoData::Large);
    let catalog = PhaseCatalog::default();
    let grid = WeekGrid::default();

    println!("Benchmark: assignment model build + solve");
    println!("  Employees: {}", roster.employees.len());
    println!("  Products: {}", roster.products.len());
    println!();

    let build_start = Instant::now();
    let model = AssignmentModel::build(&roster.employees, &roster.products, &catalog, grid);
    let constraints = install_slot_constraints(&model);
    let objective = compose_objective(&model, &roster.products);

    println!("  Variables: {}", model.variable_count());
    println!("  Constraints: {}", constraints.len());
    println!("  Build time: {:.2?}", build_start.elapsed());

    let outcome =
        solve(model, constraints, objective, &SolverConfig::default()).expect("engine available");

    println!();
    println!("Results:");
    println!("  Status: {}", outcome.status.as_str());
    println!("  Assignments: {}", outcome.selected.len());
    println!("  Solve time: {:.2?}", outcome.wall_time);
}
