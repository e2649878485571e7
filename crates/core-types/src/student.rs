use crate::enums::{AttendanceBand, ResultStatus};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marks at or above this value count as a pass.
pub const PASS_MARK: f64 = 40.0;

/// A persisted student record.
///
/// The identifier is assigned by the store on creation and serialized as `_id`,
/// the document-store convention the front-end consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub roll_no: String,
    /// Attendance percentage, expected in 0..=100 but not validated.
    pub attendance: f64,
    /// Marks percentage, expected in 0..=100 but not validated.
    pub marks: f64,
}

impl StudentRecord {
    /// Builds a record from a create payload, enforcing that every field is present.
    pub fn from_new(id: Uuid, new: NewStudent) -> Result<Self, CoreError> {
        let mut missing = Vec::new();
        if new.name.as_deref().is_none_or(str::is_empty) {
            missing.push("name");
        }
        if new.roll_no.as_deref().is_none_or(str::is_empty) {
            missing.push("rollNo");
        }
        if new.attendance.is_none() {
            missing.push("attendance");
        }
        if new.marks.is_none() {
            missing.push("marks");
        }

        match new {
            NewStudent {
                name: Some(name),
                roll_no: Some(roll_no),
                attendance: Some(attendance),
                marks: Some(marks),
            } if missing.is_empty() => Ok(Self {
                id,
                name,
                roll_no,
                attendance,
                marks,
            }),
            _ => Err(CoreError::MissingFields(missing)),
        }
    }

    /// Overwrites every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(roll_no) = patch.roll_no {
            self.roll_no = roll_no;
        }
        if let Some(attendance) = patch.attendance {
            self.attendance = attendance;
        }
        if let Some(marks) = patch.marks {
            self.marks = marks;
        }
    }

    pub fn passed(&self) -> bool {
        self.marks >= PASS_MARK
    }

    pub fn status(&self) -> ResultStatus {
        if self.passed() {
            ResultStatus::Pass
        } else {
            ResultStatus::Fail
        }
    }

    pub fn attendance_band(&self) -> AttendanceBand {
        AttendanceBand::from_attendance(self.attendance)
    }

    /// The first whitespace-delimited token of the name, used to label chart bars.
    pub fn chart_label(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// The body of a create request. Every field is optional on the wire so that
/// missing fields are reported by the store rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewStudent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<f64>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, roll_no: impl Into<String>, attendance: f64, marks: f64) -> Self {
        Self {
            name: Some(name.into()),
            roll_no: Some(roll_no.into()),
            attendance: Some(attendance),
            marks: Some(marks),
        }
    }
}

/// The body of an update request. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<f64>,
}

impl StudentPatch {
    /// A patch that replaces all four fields.
    pub fn full(name: impl Into<String>, roll_no: impl Into<String>, attendance: f64, marks: f64) -> Self {
        Self {
            name: Some(name.into()),
            roll_no: Some(roll_no.into()),
            attendance: Some(attendance),
            marks: Some(marks),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.roll_no.is_none() && self.attendance.is_none() && self.marks.is_none()
    }
}

/// The body returned by a delete request, whether or not a record existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl DeleteConfirmation {
    pub fn student_deleted() -> Self {
        Self {
            message: "Student deleted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::AttendanceBand;

    fn alice() -> StudentRecord {
        StudentRecord::from_new(Uuid::new_v4(), NewStudent::new("Alice Roy", "R1", 80.0, 35.0)).unwrap()
    }

    #[test]
    fn from_new_reports_every_missing_field() {
        let err = StudentRecord::from_new(
            Uuid::new_v4(),
            NewStudent {
                name: Some(String::new()),
                attendance: Some(50.0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, CoreError::MissingFields(vec!["name", "rollNo", "marks"]));
    }

    #[test]
    fn pass_and_band_for_failing_regular_attendee() {
        let record = alice();
        assert!(!record.passed());
        assert_eq!(record.status(), ResultStatus::Fail);
        assert_eq!(record.attendance_band(), AttendanceBand::Excellent);
    }

    #[test]
    fn exactly_forty_passes() {
        let mut record = alice();
        record.marks = 40.0;
        assert!(record.passed());
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut record = alice();
        record.apply(StudentPatch {
            marks: Some(72.5),
            ..Default::default()
        });
        assert_eq!(record.name, "Alice Roy");
        assert_eq!(record.roll_no, "R1");
        assert_eq!(record.marks, 72.5);
    }

    #[test]
    fn chart_label_is_first_name_token() {
        let mut record = alice();
        assert_eq!(record.chart_label(), "Alice");
        record.name = "   ".to_string();
        assert_eq!(record.chart_label(), "");
    }

    #[test]
    fn record_uses_document_store_field_names() {
        let record = alice();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("_id").is_some());
        assert_eq!(json["rollNo"], "R1");
        assert_eq!(json["attendance"], 80.0);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = StudentPatch {
            roll_no: Some("R9".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"rollNo":"R9"}"#);
        assert!(!patch.is_empty());
        assert!(StudentPatch::default().is_empty());
    }
}
