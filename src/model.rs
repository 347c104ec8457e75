//! Assignment model builder.
//!
//! Turns employees × products × time grid × task phases into a sparse map of
//! binary decision variables, one per structurally valid
//! (employee, product, day, hour, phase) tuple.

use good_lp::{variable, ProblemVariables, Variable};
use std::collections::HashMap;

use crate::domain::{Employee, PhaseCatalog, Product, WeekGrid};

/// Composite key of one candidate assignment.
///
/// `employee` and `product` are positions in the request rosters and
/// `phase` is a position in the phase catalog, following the index-join
/// convention used throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarKey {
    pub employee: usize,
    pub product: usize,
    pub day: u32,
    pub hour: u32,
    pub phase: usize,
}

/// The full decision-variable space for one optimization request.
///
/// Variable count is exactly
/// `|employees| × |products| × grid.days × grid.hours_per_day() × |phases|`.
/// No variable exists outside that cross product, and the builder applies no
/// internal guard against combinatorial growth; the caller controls roster
/// and catalog size.
pub struct AssignmentModel {
    vars: ProblemVariables,
    by_key: HashMap<VarKey, Variable>,
    grid: WeekGrid,
    employee_count: usize,
    product_count: usize,
    phase_count: usize,
}

impl AssignmentModel {
    /// Builds the exhaustive cross product of assignment variables.
    pub fn build(
        employees: &[Employee],
        products: &[Product],
        catalog: &PhaseCatalog,
        grid: WeekGrid,
    ) -> Self {
        let capacity = employees.len()
            * products.len()
            * grid.slot_count() as usize
            * catalog.len();

        let mut vars = ProblemVariables::new();
        let mut by_key = HashMap::with_capacity(capacity);

        for employee in 0..employees.len() {
            for product in 0..products.len() {
                for day in grid.day_indices() {
                    for hour in grid.hours() {
                        for phase in 0..catalog.len() {
                            let key = VarKey {
                                employee,
                                product,
                                day,
                                hour,
                                phase,
                            };
                            by_key.insert(key, vars.add(variable().binary()));
                        }
                    }
                }
            }
        }

        Self {
            vars,
            by_key,
            grid,
            employee_count: employees.len(),
            product_count: products.len(),
            phase_count: catalog.len(),
        }
    }

    /// Looks up the decision variable for a key.
    ///
    /// Returns an explicit `None` for keys outside the generated cross
    /// product; callers must not treat an absent variable as a zero term.
    pub fn lookup(&self, key: &VarKey) -> Option<Variable> {
        self.by_key.get(key).copied()
    }

    /// Iterates all (key, variable) pairs in map order (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (VarKey, Variable)> + '_ {
        self.by_key.iter().map(|(k, v)| (*k, *v))
    }

    pub fn variable_count(&self) -> usize {
        self.by_key.len()
    }

    pub fn grid(&self) -> WeekGrid {
        self.grid
    }

    pub fn employee_count(&self) -> usize {
        self.employee_count
    }

    pub fn product_count(&self) -> usize {
        self.product_count
    }

    pub fn phase_count(&self) -> usize {
        self.phase_count
    }

    /// Decomposes the model for solver hand-off.
    pub(crate) fn into_parts(self) -> (ProblemVariables, HashMap<VarKey, Variable>) {
        (self.vars, self.by_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, PhaseCatalog, Product, WeekGrid};

    fn roster(employees: usize, products: usize) -> (Vec<Employee>, Vec<Product>) {
        let employees = (0..employees)
            .map(|i| Employee::new(format!("E{i:03}"), format!("Employee {i}"), "Assembly"))
            .collect();
        let products = (0..products)
            .map(|i| Product::new(format!("P{i:03}"), format!("Product {i}"), 5))
            .collect();
        (employees, products)
    }

    #[test]
    fn test_variable_count_is_full_cross_product() {
        let (employees, products) = roster(2, 2);
        let model = AssignmentModel::build(
            &employees,
            &products,
            &PhaseCatalog::default(),
            WeekGrid::default(),
        );

        // 2 × 2 × 7 × 9 × 4
        assert_eq!(model.variable_count(), 1008);
    }

    #[test]
    fn test_empty_roster_builds_empty_model() {
        let (_, products) = roster(0, 3);
        let model = AssignmentModel::build(
            &[],
            &products,
            &PhaseCatalog::default(),
            WeekGrid::default(),
        );
        assert_eq!(model.variable_count(), 0);
    }

    #[test]
    fn test_lookup_inside_and_outside_grid() {
        let (employees, products) = roster(1, 1);
        let model = AssignmentModel::build(
            &employees,
            &products,
            &PhaseCatalog::default(),
            WeekGrid::default(),
        );

        let valid = VarKey {
            employee: 0,
            product: 0,
            day: 6,
            hour: 16,
            phase: 3,
        };
        assert!(model.lookup(&valid).is_some());

        // Hour 17 is the exclusive upper bound.
        let outside = VarKey { hour: 17, ..valid };
        assert!(model.lookup(&outside).is_none());

        let unknown_product = VarKey {
            product: 1,
            ..valid
        };
        assert!(model.lookup(&unknown_product).is_none());
    }

    #[test]
    fn test_custom_catalog_scales_variable_count() {
        let (employees, products) = roster(1, 1);
        let catalog = PhaseCatalog::new(vec![crate::domain::TaskPhase::new(
            "assembly",
            45,
            "Single-step assembly",
        )]);
        let model =
            AssignmentModel::build(&employees, &products, &catalog, WeekGrid::new(5, 9, 12));

        // 1 × 1 × 5 × 3 × 1
        assert_eq!(model.variable_count(), 15);
    }
}
