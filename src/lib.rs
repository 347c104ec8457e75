//! Production workforce scheduling service.
//!
//! Builds a binary assignment model over employees, products, the weekly
//! time grid, and production phases; maximizes priority-weighted coverage
//! with a MILP engine; and extracts a schedule with per-day analytics.

pub mod api;
pub mod constraints;
pub mod demo_data;
pub mod domain;
pub mod dto;
pub mod extract;
pub mod model;
pub mod solver;
