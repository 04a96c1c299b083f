//! # drill_core - Arithmetic Worksheet Engine
//!
//! `drill_core` generates printable arithmetic practice for elementary
//! grades 1 through 6 and works out how the problems lay out on paper.
//! Everything it produces is plain, serializable data; rendering is left to
//! front ends such as the `drill` command-line tool.
//!
//! ## Design Philosophy
//!
//! - **Pure generation**: Generators take an injected `rand::Rng` and
//!   never touch global state, so a seeded source reproduces a worksheet
//! - **JSON-First**: Settings, problems and worksheets implement
//!   Serialize/Deserialize
//! - **Rich Errors**: Structured error types at the fallible edges
//! - **Data-driven difficulty**: Numeric ranges live in per-band tables
//!
//! ## Quick Start
//!
//! ```rust
//! use drill_core::{generate_problems, reorder_for_layout, WorksheetSettings};
//! use drill_core::problem::ProblemType;
//! use rand::SeedableRng;
//!
//! let settings = WorksheetSettings {
//!     problem_type: ProblemType::Hissan,
//!     problem_count: 6,
//!     ..Default::default()
//! };
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let problems = generate_problems(&mut rng, &settings);
//!
//! let cells = reorder_for_layout(&problems, settings.layout_columns);
//! assert_eq!(cells.len(), 6);
//!
//! let json = serde_json::to_string_pretty(&problems).unwrap();
//! assert!(json.contains("\"type\": \"hissan\""));
//! ```
//!
//! ## Modules
//!
//! - [`grade`] - Grades, difficulty bands and band tables
//! - [`problem`] - The problem sum type and its text rendering
//! - [`settings`] / [`pattern`] - Worksheet settings and scenario patterns
//! - [`generators`] - Problem generators and the dispatcher
//! - [`layout`] - Column-major print order and A4 capacity
//! - [`worksheet`] - Worksheet snapshots, sessions and batches
//! - [`file_io`] - Settings cache with atomic saves and locking
//! - [`errors`] - Structured error types

pub mod errors;
pub mod file_io;
pub mod generators;
pub mod grade;
pub mod layout;
pub mod math;
pub mod pattern;
pub mod problem;
pub mod random;
pub mod settings;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use errors::{DrillError, DrillResult};
pub use file_io::{load_settings, load_settings_or_default, save_settings, SettingsLock};
pub use generators::generate_problems;
pub use grade::{Grade, GradeBand};
pub use layout::{
    check_a4_overflow, detect_primary_problem_type, fits_in_a4, layout_grid, reorder_for_layout,
    RenderMode,
};
pub use pattern::CalculationPattern;
pub use problem::{Operation, Problem, ProblemType};
pub use settings::{LayoutColumns, WorksheetSettings};
pub use worksheet::{build_worksheet_batch, WorksheetData, WorksheetSession};
