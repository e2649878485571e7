use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the list view shows above the table: the summary cards and the
/// data behind the three charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: SummaryStats,
    /// The first few records in fetch order, labelled by first name.
    pub attendance_chart: Vec<ChartPoint>,
    pub pass_fail_chart: [OutcomeSlice; 2],
    /// Every record in fetch order, labelled by first name.
    pub marks_chart: Vec<ChartPoint>,
}

/// Aggregates over the full, unfiltered record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_students: usize,
    pub passed_students: usize,
    /// Rounded to 2 decimal places.
    pub pass_percentage: Decimal,
    /// Rounded to 1 decimal place.
    pub avg_attendance: f64,
    /// Rounded to 1 decimal place.
    pub avg_marks: f64,
}

impl SummaryStats {
    /// The all-zero summary reported for an empty record set.
    pub fn empty() -> Self {
        Self {
            total_students: 0,
            passed_students: 0,
            pass_percentage: Decimal::ZERO,
            avg_attendance: 0.0,
            avg_marks: 0.0,
        }
    }

    pub fn failed_students(&self) -> usize {
        self.total_students - self.passed_students
    }
}

impl Default for SummaryStats {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Passed => "Passed",
            Outcome::Failed => "Failed",
        }
    }
}

/// One slice of the pass/fail breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSlice {
    pub outcome: Outcome,
    pub count: usize,
}
