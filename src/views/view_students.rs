use crate::charts::{bar_chart, outcome_chart};
use crate::notify;
use crate::prompt::Prompter;
use analytics::{AnalyticsEngine, DashboardReport, StudentQuery};
use anyhow::{Context, anyhow};
use api_client::StudentApi;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::{AttendanceBand, ResultStatus, StudentPatch, StudentRecord};
use std::fmt::Write;
use uuid::Uuid;

const NO_MATCHES: &str = "No students found matching your search";

/// Fetches every record and prints the dashboard and the filtered table.
pub async fn show(api: &dyn StudentApi, query: &StudentQuery) -> anyhow::Result<()> {
    let students = api.list_students().await.context("Failed to fetch students.")?;
    print!("{}", render(&students, query));
    Ok(())
}

/// The whole list screen as text. Statistics and charts use the full set,
/// the table only what `query` lets through.
pub fn render(students: &[StudentRecord], query: &StudentQuery) -> String {
    let report = AnalyticsEngine::new().calculate(students);
    let rows = query.apply(students);

    let mut out = String::new();
    out.push_str(&summary_cards(&report));
    out.push('\n');
    out.push_str(&bar_chart(
        "Attendance Overview",
        "Student attendance percentages",
        &report.attendance_chart,
        "%",
    ));
    out.push('\n');
    out.push_str(&outcome_chart(
        "Pass/Fail Ratio",
        "Overall student performance",
        &report.pass_fail_chart,
    ));
    out.push('\n');
    out.push_str(&bar_chart("Marks Distribution", "Student marks overview", &report.marks_chart, ""));
    out.push('\n');

    let _ = writeln!(out, "Student Records ({}, {})", query.sort_key, query.order.arrow());
    if rows.is_empty() {
        let _ = writeln!(out, "{NO_MATCHES}");
    } else {
        let _ = writeln!(out, "{}", student_table(&rows));
    }
    let _ = writeln!(out, "Showing {} of {} students", rows.len(), students.len());
    out
}

fn summary_cards(report: &DashboardReport) -> String {
    let summary = &report.summary;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Total Students", "Pass Rate", "Avg Attendance", "Avg Marks"])
        .add_row(vec![
            Cell::new(summary.total_students),
            Cell::new(format!("{:.2}%", summary.pass_percentage)),
            Cell::new(format!("{:.1}%", summary.avg_attendance)),
            Cell::new(format!("{:.1}", summary.avg_marks)),
        ]);
    format!("{table}\n")
}

/// The student table with attendance and result badges.
pub fn student_table(rows: &[&StudentRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Name", "Roll No", "Attendance", "Marks", "Status"]);

    for student in rows {
        let band = student.attendance_band();
        let status = student.status();
        table.add_row(vec![
            Cell::new(student.id),
            Cell::new(&student.name),
            Cell::new(&student.roll_no),
            Cell::new(format!("{}% ({band})", student.attendance)).fg(band_color(band)),
            Cell::new(student.marks).set_alignment(CellAlignment::Right),
            Cell::new(status).fg(status_color(status)),
        ]);
    }
    table
}

fn band_color(band: AttendanceBand) -> Color {
    match band {
        AttendanceBand::Excellent => Color::Green,
        AttendanceBand::Good => Color::Cyan,
        AttendanceBand::Average => Color::Yellow,
        AttendanceBand::Poor => Color::Red,
    }
}

fn status_color(status: ResultStatus) -> Color {
    match status {
        ResultStatus::Pass => Color::Green,
        ResultStatus::Fail => Color::Red,
    }
}

/// Prompts for all four fields, pre-filled with the current values, then
/// sends them as one update and refreshes the list.
pub async fn update(
    api: &dyn StudentApi,
    prompter: &mut dyn Prompter,
    id: Uuid,
    query: &StudentQuery,
) -> anyhow::Result<()> {
    let students = api.list_students().await.context("Failed to fetch students.")?;
    let current = students
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow!("No student with id {id}."))?;

    let Some(patch) = ask_changes(prompter, current)? else {
        notify::cancelled("Update cancelled.");
        return Ok(());
    };

    let updated = api
        .update_student(id, &patch)
        .await
        .context("Failed to update student.")?;
    match updated {
        Some(student) => {
            tracing::debug!(id = %student.id, "Student record replaced.");
            notify::success("Student updated successfully!");
        }
        None => tracing::warn!(%id, "Student disappeared before the update was applied."),
    }
    show(api, query).await
}

/// Every answer must be non-empty and the numeric ones must parse to a finite
/// number, otherwise the whole update is abandoned.
fn ask_changes(prompter: &mut dyn Prompter, current: &StudentRecord) -> anyhow::Result<Option<StudentPatch>> {
    let attendance = current.attendance.to_string();
    let marks = current.marks.to_string();

    let Some(name) = non_empty(prompter.ask("Enter new name", Some(&current.name))?) else {
        return Ok(None);
    };
    let Some(roll_no) = non_empty(prompter.ask("Enter new roll number", Some(&current.roll_no))?) else {
        return Ok(None);
    };
    let Some(attendance) = number(prompter.ask("Enter new attendance", Some(&attendance))?) else {
        return Ok(None);
    };
    let Some(marks) = number(prompter.ask("Enter new marks", Some(&marks))?) else {
        return Ok(None);
    };
    Ok(Some(StudentPatch::full(name, roll_no, attendance, marks)))
}

fn non_empty(answer: Option<String>) -> Option<String> {
    answer.filter(|a| !a.trim().is_empty())
}

fn number(answer: Option<String>) -> Option<f64> {
    non_empty(answer)
        .and_then(|a| a.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Deletes after confirmation (skipped with `assume_yes`) and refreshes the list.
pub async fn delete(
    api: &dyn StudentApi,
    prompter: &mut dyn Prompter,
    id: Uuid,
    assume_yes: bool,
    query: &StudentQuery,
) -> anyhow::Result<()> {
    if !assume_yes && !prompter.confirm("Are you sure you want to delete this student?")? {
        notify::cancelled("Delete cancelled.");
        return Ok(());
    }

    let confirmation = api
        .delete_student(id)
        .await
        .context("Failed to delete student.")?;
    tracing::debug!(%id, message = %confirmation.message, "Delete acknowledged.");
    notify::success("Student deleted successfully!");
    show(api, query).await
}
