use crate::report::{ChartPoint, DashboardReport, Outcome, OutcomeSlice, SummaryStats};
use core_types::StudentRecord;
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

/// How many records the attendance chart shows.
pub const ATTENDANCE_CHART_LIMIT: usize = 10;

/// A stateless calculator for the dashboard above the student table.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the dashboard for a fetched record set.
    ///
    /// `students` must be the full set in fetch order: statistics and charts
    /// ignore whatever search or sort the table is currently using.
    pub fn calculate(&self, students: &[StudentRecord]) -> DashboardReport {
        let summary = self.summarize(students);
        let pass_fail_chart = [
            OutcomeSlice {
                outcome: Outcome::Passed,
                count: summary.passed_students,
            },
            OutcomeSlice {
                outcome: Outcome::Failed,
                count: summary.failed_students(),
            },
        ];

        DashboardReport {
            attendance_chart: chart(students.iter().take(ATTENDANCE_CHART_LIMIT), |s| s.attendance),
            marks_chart: chart(students.iter(), |s| s.marks),
            pass_fail_chart,
            summary,
        }
    }

    /// Computes pass rate and averages. An empty set yields all zeros.
    pub fn summarize(&self, students: &[StudentRecord]) -> SummaryStats {
        if students.is_empty() {
            return SummaryStats::empty();
        }

        let total = students.len();
        let passed = students.iter().filter(|s| s.passed()).count();

        let pass_percentage = (Decimal::from(passed) * Decimal::ONE_HUNDRED / Decimal::from(total))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let attendance: Vec<f64> = students.iter().map(|s| s.attendance).collect();
        let marks: Vec<f64> = students.iter().map(|s| s.marks).collect();
        let avg_attendance = rounded_mean(&attendance, 1);
        let avg_marks = rounded_mean(&marks, 1);

        tracing::debug!(total, passed, %pass_percentage, avg_attendance, avg_marks, "Computed student summary.");

        SummaryStats {
            total_students: total,
            passed_students: passed,
            pass_percentage,
            avg_attendance,
            avg_marks,
        }
    }
}

fn chart<'a>(
    students: impl Iterator<Item = &'a StudentRecord>,
    value: impl Fn(&StudentRecord) -> f64,
) -> Vec<ChartPoint> {
    students
        .map(|s| ChartPoint {
            label: s.chart_label().to_string(),
            value: value(s),
        })
        .collect()
}

/// Arithmetic mean of a non-empty slice rounded to `dp` places, half away
/// from zero.
///
/// The sum is taken exactly in decimal when every value fits; otherwise the
/// mean is computed in `f64`, where values that large have no fractional part
/// left to round.
fn rounded_mean(values: &[f64], dp: u32) -> f64 {
    if let Some(mean) = decimal_mean(values) {
        let rounded = mean.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        if let Some(rounded) = rounded.to_f64() {
            return rounded;
        }
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    tracing::debug!(mean, "Mean is outside the decimal range; using floating point.");
    // Past 2^52 every f64 is already a whole number.
    if !mean.is_finite() || mean.abs() >= 2f64.powi(52) {
        return mean;
    }
    let scale = 10f64.powi(dp as i32);
    (mean * scale).round() / scale
}

fn decimal_mean(values: &[f64]) -> Option<Decimal> {
    let mut sum = Decimal::ZERO;
    for value in values {
        sum = sum.checked_add(Decimal::from_f64(*value)?)?;
    }
    sum.checked_div(Decimal::from(values.len()))
}
