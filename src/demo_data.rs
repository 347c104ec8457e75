//! Demo data generators for production scheduling.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::domain::{Employee, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoData {
    Small,
    Large,
}

impl std::str::FromStr for DemoData {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoData::Small),
            "LARGE" => Ok(DemoData::Large),
            _ => Err(()),
        }
    }
}

impl DemoData {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoData::Small => "SMALL",
            DemoData::Large => "LARGE",
        }
    }

    fn parameters(&self) -> DemoDataParameters {
        match self {
            DemoData::Small => DemoDataParameters {
                departments: vec!["Assembly", "Finishing", "Quality"],
                employee_count: 4,
                product_count: 3,
            },
            DemoData::Large => DemoDataParameters {
                departments: vec![
                    "Assembly",
                    "Machining",
                    "Finishing",
                    "Quality",
                    "Logistics",
                ],
                employee_count: 12,
                product_count: 8,
            },
        }
    }
}

struct DemoDataParameters {
    departments: Vec<&'static str>,
    employee_count: usize,
    product_count: usize,
}

/// A generated demo roster: the request payload minus the reserved fields.
#[derive(Debug, Clone, Serialize)]
pub struct DemoRoster {
    pub employees: Vec<Employee>,
    pub products: Vec<Product>,
}

/// List of available demo data sets.
pub fn list_demo_data() -> Vec<&'static str> {
    vec!["SMALL", "LARGE"]
}

/// Generates a demo roster for the given size. Deterministic per size.
pub fn generate(demo: DemoData) -> DemoRoster {
    let params = demo.parameters();
    let mut rng = StdRng::seed_from_u64(0);

    let name_permutations = generate_name_permutations(&mut rng);

    let employees = (0..params.employee_count)
        .map(|i| {
            let name = name_permutations[i % name_permutations.len()].clone();
            let department = params
                .departments
                .choose(&mut rng)
                .copied()
                .unwrap_or("Assembly");
            Employee::new(format!("E{:03}", i + 1), name, department)
        })
        .collect();

    let products = (0..params.product_count)
        .map(|i| {
            let name = PRODUCT_NAMES[i % PRODUCT_NAMES.len()];
            let mut product =
                Product::new(format!("PRD-{:03}", i + 1), name, rng.gen_range(1..=10));
            product.batch_time = rng.gen_range(4..=16) as f64 * 0.5;
            product
        })
        .collect();

    DemoRoster {
        employees,
        products,
    }
}

const FIRST_NAMES: &[&str] = &[
    "Nora", "Theo", "Mira", "Abel", "Ines", "Otto", "Vera", "Silas", "June", "Remy",
];
const LAST_NAMES: &[&str] = &[
    "Vance", "Marsh", "Holt", "Lindt", "Ferro", "Quinn", "Soto", "Bauer", "Crane", "Wells",
];

const PRODUCT_NAMES: &[&str] = &[
    "Gear Housing",
    "Drive Shaft",
    "Control Panel",
    "Valve Block",
    "Bearing Mount",
    "Pump Casing",
    "Sensor Bracket",
    "Clutch Plate",
    "Rotor Hub",
    "Cooling Jacket",
];

fn generate_name_permutations(rng: &mut StdRng) -> Vec<String> {
    let mut names = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for first in FIRST_NAMES {
        for last in LAST_NAMES {
            names.push(format!("{} {}", first, last));
        }
    }
    names.shuffle(rng);
    names
}
