//! Domain model for production workforce scheduling.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// An employee who can be assigned production work.
///
/// Supplied by the caller and immutable for the duration of one
/// optimization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub department: String,
}

impl Employee {
    pub fn new(
        employee_id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            department: department.into(),
        }
    }
}

/// A product competing for employee hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_code: String,
    pub name: String,
    /// Lower value means more urgent. Consumed only through the
    /// rank-to-weight mapping in the objective.
    pub priority: i32,
    /// Total batch time hint in hours. Part of the input contract; the
    /// phase model does not consume it.
    #[serde(default)]
    pub batch_time: f64,
}

impl Product {
    pub fn new(product_code: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            product_code: product_code.into(),
            name: name.into(),
            priority,
            batch_time: 0.0,
        }
    }
}

/// One production phase a product passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPhase {
    pub id: String,
    pub duration_minutes: i64,
    pub description: String,
}

impl TaskPhase {
    pub fn new(id: impl Into<String>, duration_minutes: i64, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            duration_minutes,
            description: description.into(),
        }
    }

    /// Phase duration in fractional hours.
    ///
    /// ```
    /// use production_scheduling::domain::TaskPhase;
    ///
    /// let setup = TaskPhase::new("setup", 30, "Machine setup");
    /// assert_eq!(setup.duration_hours(), 0.5);
    /// ```
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes as f64 / 60.0
    }
}

/// The ordered catalog of production phases.
///
/// Identical for every product. Passed explicitly into the model builder
/// so alternate phase sets can be substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseCatalog {
    phases: Vec<TaskPhase>,
}

impl PhaseCatalog {
    pub fn new(phases: Vec<TaskPhase>) -> Self {
        Self { phases }
    }

    pub fn phases(&self) -> &[TaskPhase] {
        &self.phases
    }

    pub fn get(&self, index: usize) -> Option<&TaskPhase> {
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

impl Default for PhaseCatalog {
    /// The built-in four-phase catalog: setup (0.5h), production (1h),
    /// quality check (0.25h), packaging (0.25h).
    fn default() -> Self {
        Self::new(vec![
            TaskPhase::new("setup", 30, "Machine setup and material preparation"),
            TaskPhase::new("production", 60, "Main production run"),
            TaskPhase::new("quality_check", 15, "Quality inspection and sign-off"),
            TaskPhase::new("packaging", 15, "Packaging and handover to logistics"),
        ])
    }
}

/// The fixed weekly assignment grid: Monday-relative day indices and an
/// hourly business-day window with an exclusive upper bound.
///
/// Both variable generation and constraint installation iterate this same
/// value, so the two can never disagree on the grid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekGrid {
    pub days: u32,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WeekGrid {
    pub fn new(days: u32, start_hour: u32, end_hour: u32) -> Self {
        Self {
            days,
            start_hour,
            end_hour,
        }
    }

    /// Day indices, 0 = Monday.
    pub fn day_indices(&self) -> Range<u32> {
        0..self.days
    }

    /// Hour-of-day values covered by the grid (upper bound exclusive).
    pub fn hours(&self) -> Range<u32> {
        self.start_hour..self.end_hour
    }

    pub fn hours_per_day(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    /// Total (day, hour) slots in the grid.
    pub fn slot_count(&self) -> u32 {
        self.days * self.hours_per_day()
    }
}

impl Default for WeekGrid {
    /// Seven days, business hours 8:00 to 17:00.
    fn default() -> Self {
        Self::new(7, 8, 17)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = PhaseCatalog::default();
        assert_eq!(catalog.len(), 4);

        let ids: Vec<&str> = catalog.phases().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["setup", "production", "quality_check", "packaging"]);

        let hours: Vec<f64> = catalog.phases().iter().map(|p| p.duration_hours()).collect();
        assert_eq!(hours, [0.5, 1.0, 0.25, 0.25]);
    }

    #[test]
    fn test_catalog_substitution() {
        let catalog = PhaseCatalog::new(vec![TaskPhase::new("assembly", 45, "Single-step assembly")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).map(|p| p.duration_minutes), Some(45));
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn test_default_grid() {
        let grid = WeekGrid::default();
        assert_eq!(grid.days, 7);
        assert_eq!(grid.hours(), 8..17);
        assert_eq!(grid.hours_per_day(), 9);
        assert_eq!(grid.slot_count(), 63);
    }

    #[test]
    fn test_inverted_grid_is_empty() {
        let grid = WeekGrid::new(7, 17, 8);
        assert_eq!(grid.hours_per_day(), 0);
        assert_eq!(grid.slot_count(), 0);
    }
}
