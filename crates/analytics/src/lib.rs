//! # Student Portal Analytics
//!
//! The logic behind the student list view: search, sort, summary statistics
//! and chart data.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of HTTP or storage. It depends
//!   only on `core-types`.
//! - **Full-Set Statistics:** The `AnalyticsEngine` always works on the complete
//!   fetched set, while `StudentQuery` only shapes what the table shows.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Computes the `DashboardReport` for a record set.
//! - `StudentQuery`: Applies the search box and sort controls.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod query;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, ATTENDANCE_CHART_LIMIT};
pub use query::{compare_by, StudentQuery};
pub use report::{ChartPoint, DashboardReport, Outcome, OutcomeSlice, SummaryStats};
