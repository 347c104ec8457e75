//! Slot constraints and the priority objective.
//!
//! The only hard constraint is no double-booking: for every
//! (employee, day, hour) slot, at most one (product, phase) variable may be
//! true. The model is otherwise fully permissive: an employee can be left
//! idle and a product can be fully unscheduled. Phase ordering and
//! continuity are deliberately not constrained.

use good_lp::{constraint, Constraint, Expression};

use crate::domain::Product;
use crate::model::{AssignmentModel, VarKey};

/// Highest priority rank that still carries weight.
const PRIORITY_WEIGHT_CEILING: i32 = 10;

/// Installs one at-most-one constraint per (employee, day, hour) slot.
///
/// Slots with no variables are skipped rather than given a vacuous
/// constraint, so the count of installed constraints equals the number of
/// populated slots.
pub fn install_slot_constraints(model: &AssignmentModel) -> Vec<Constraint> {
    let grid = model.grid();
    let mut constraints = Vec::new();

    for employee in 0..model.employee_count() {
        for day in grid.day_indices() {
            for hour in grid.hours() {
                let mut slot = Expression::from(0.0);
                let mut populated = false;

                for product in 0..model.product_count() {
                    for phase in 0..model.phase_count() {
                        let key = VarKey {
                            employee,
                            product,
                            day,
                            hour,
                            phase,
                        };
                        if let Some(var) = model.lookup(&key) {
                            slot += var;
                            populated = true;
                        }
                    }
                }

                if populated {
                    constraints.push(constraint!(slot <= 1));
                }
            }
        }
    }

    constraints
}

/// Maps a product's priority rank to its objective weight.
///
/// Monotonically non-increasing in the rank and clamped at zero, so
/// priorities past the ceiling contribute no incentive rather than an
/// actively avoided negative one.
///
/// ```
/// use production_scheduling::constraints::priority_weight;
///
/// assert_eq!(priority_weight(1), 9.0);
/// assert_eq!(priority_weight(9), 1.0);
/// assert_eq!(priority_weight(15), 0.0);
/// ```
pub fn priority_weight(priority: i32) -> f64 {
    (PRIORITY_WEIGHT_CEILING - priority).max(0) as f64
}

/// Builds the weighted-sum coverage objective, to be maximized.
///
/// A single scalar objective: the solver may trade many low-priority
/// assignments against fewer high-priority ones if the linear sum favors
/// it. There is no lexicographic layering.
pub fn compose_objective(model: &AssignmentModel, products: &[Product]) -> Expression {
    let mut objective = Expression::from(0.0);

    for (index, product) in products.iter().enumerate() {
        let coverage: Expression = model
            .iter()
            .filter(|(key, _)| key.product == index)
            .map(|(_, var)| var)
            .sum();
        objective += priority_weight(product.priority) * coverage;
    }

    objective
}
