use analytics::{ChartPoint, OutcomeSlice};
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

/// Draws one horizontal bar per point, scaled so that 100 (or the largest
/// value, if bigger) spans the full width.
pub fn bar_chart(title: &str, subtitle: &str, points: &[ChartPoint], unit: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  {subtitle}");
    if points.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let scale = points.iter().map(|p| p.value).fold(100.0_f64, f64::max);
    let label_width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
    for point in points {
        let _ = writeln!(
            out,
            "  {:<label_width$} │{} {}{unit}",
            point.label,
            bar(point.value, scale),
            point.value,
        );
    }
    out
}

/// Draws the pass/fail breakdown with each slice's share of the total.
pub fn outcome_chart(title: &str, subtitle: &str, slices: &[OutcomeSlice]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  {subtitle}");

    let total: usize = slices.iter().map(|s| s.count).sum();
    for slice in slices {
        let share = if total == 0 {
            0.0
        } else {
            slice.count as f64 * 100.0 / total as f64
        };
        let _ = writeln!(
            out,
            "  {:<6} │{} {} ({share:.0}%)",
            slice.outcome.as_str(),
            bar(share, 100.0),
            slice.count,
        );
    }
    out
}

fn bar(value: f64, scale: f64) -> String {
    let filled = if scale > 0.0 && value > 0.0 {
        ((value / scale) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::Outcome;

    #[test]
    fn bars_scale_to_hundred() {
        assert_eq!(bar(50.0, 100.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(bar(-5.0, 100.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(bar(500.0, 100.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
    }

    #[test]
    fn bar_chart_lists_each_label() {
        let points = vec![
            ChartPoint { label: "Alice".into(), value: 80.0 },
            ChartPoint { label: "Bo".into(), value: 55.5 },
        ];
        let chart = bar_chart("Attendance Overview", "per student", &points, "%");
        assert!(chart.contains("Alice"));
        assert!(chart.contains("55.5%"));
        assert!(bar_chart("Empty", "", &[], "").contains("(no data)"));
    }

    #[test]
    fn outcome_chart_shows_shares() {
        let slices = [
            OutcomeSlice { outcome: Outcome::Passed, count: 1 },
            OutcomeSlice { outcome: Outcome::Failed, count: 3 },
        ];
        let chart = outcome_chart("Pass/Fail Distribution", "", &slices);
        assert!(chart.contains("Passed"));
        assert!(chart.contains("1 (25%)"));
        assert!(chart.contains("3 (75%)"));
    }
}
