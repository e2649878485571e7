use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The column the student list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    RollNo,
    Attendance,
    Marks,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::RollNo => "rollNo",
            SortKey::Attendance => "attendance",
            SortKey::Marks => "marks",
        }
    }

    /// Text keys compare case-insensitively, numeric keys compare by value.
    pub fn is_text(&self) -> bool {
        matches!(self, SortKey::Name | SortKey::RollNo)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "rollno" | "roll-no" | "roll_no" => Ok(SortKey::RollNo),
            "attendance" => Ok(SortKey::Attendance),
            "marks" => Ok(SortKey::Marks),
            _ => Err(CoreError::InvalidInput(
                "sort key".to_string(),
                format!("'{s}' (expected one of: name, roll-no, attendance, marks)"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns the other direction.
    pub fn toggle(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// Coarse classification of a student's attendance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl AttendanceBand {
    /// Bands are open at the lower bound: exactly 75 is `Good`, not `Excellent`.
    pub fn from_attendance(attendance: f64) -> Self {
        if attendance > 75.0 {
            AttendanceBand::Excellent
        } else if attendance > 60.0 {
            AttendanceBand::Good
        } else if attendance > 40.0 {
            AttendanceBand::Average
        } else {
            AttendanceBand::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceBand::Excellent => "excellent",
            AttendanceBand::Good => "good",
            AttendanceBand::Average => "average",
            AttendanceBand::Poor => "poor",
        }
    }
}

impl fmt::Display for AttendanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Pass,
    Fail,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Pass => f.write_str("Pass"),
            ResultStatus::Fail => f.write_str("Fail"),
        }
    }
}
