use crate::notify;
use crate::prompt::{Prompter, ask_number, ask_required};
use crate::views::view_students;
use analytics::StudentQuery;
use anyhow::Context;
use api_client::StudentApi;
use core_types::NewStudent;
use std::io;

/// The add-student form. Fields given up front are used as-is, the rest are
/// asked for. Numeric fields offer 0 as their default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddStudentForm {
    pub name: Option<String>,
    pub roll_no: Option<String>,
    pub attendance: Option<f64>,
    pub marks: Option<f64>,
}

impl AddStudentForm {
    /// Fills in the missing fields. `None` if the operator cancels.
    pub fn complete(self, prompter: &mut dyn Prompter) -> io::Result<Option<NewStudent>> {
        let name = match self.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => name,
            None => match ask_required(prompter, "Name")? {
                Some(name) => name,
                None => return Ok(None),
            },
        };
        let roll_no = match self.roll_no.filter(|r| !r.trim().is_empty()) {
            Some(roll_no) => roll_no,
            None => match ask_required(prompter, "Roll Number")? {
                Some(roll_no) => roll_no,
                None => return Ok(None),
            },
        };
        let attendance = match self.attendance.filter(|a| a.is_finite()) {
            Some(attendance) => attendance,
            None => match ask_number(prompter, "Attendance (%)", 0.0)? {
                Some(attendance) => attendance,
                None => return Ok(None),
            },
        };
        let marks = match self.marks.filter(|m| m.is_finite()) {
            Some(marks) => marks,
            None => match ask_number(prompter, "Marks", 0.0)? {
                Some(marks) => marks,
                None => return Ok(None),
            },
        };
        Ok(Some(NewStudent::new(name, roll_no, attendance, marks)))
    }
}

/// Completes the form, creates the record, then shows the list view.
pub async fn submit(api: &dyn StudentApi, prompter: &mut dyn Prompter, form: AddStudentForm) -> anyhow::Result<()> {
    println!("Add New Student");
    let Some(student) = form.complete(prompter)? else {
        notify::cancelled("Add student cancelled.");
        return Ok(());
    };

    let created = api.create_student(&student).await.context("Failed to add student.")?;
    tracing::debug!(id = %created.id, roll_no = %created.roll_no, "Student created.");
    notify::success("Student added successfully!");
    view_students::show(api, &StudentQuery::default()).await
}
