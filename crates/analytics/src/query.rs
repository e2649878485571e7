use core_types::{SortKey, SortOrder, StudentRecord};
use std::cmp::Ordering;

/// The search box and sort controls of the student table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub search: String,
    pub sort_key: SortKey,
    pub order: SortOrder,
}

impl StudentQuery {
    pub fn new(search: impl Into<String>, sort_key: SortKey, order: SortOrder) -> Self {
        Self {
            search: search.into(),
            sort_key,
            order,
        }
    }

    /// Case-insensitive substring match on name or roll number. An empty
    /// search matches everything.
    pub fn matches(&self, student: &StudentRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        student.name.to_lowercase().contains(&needle) || student.roll_no.to_lowercase().contains(&needle)
    }

    /// Filters then sorts. The sort is stable: records with equal keys keep
    /// their fetch order in both directions.
    pub fn apply<'a>(&self, students: &'a [StudentRecord]) -> Vec<&'a StudentRecord> {
        let mut rows: Vec<&StudentRecord> = students.iter().filter(|s| self.matches(s)).collect();
        rows.sort_by(|a, b| {
            let ordering = compare_by(self.sort_key, a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        rows
    }
}

/// Orders two records by `key`: text keys case-insensitively, numeric keys by value.
pub fn compare_by(key: SortKey, a: &StudentRecord, b: &StudentRecord) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::RollNo => a.roll_no.to_lowercase().cmp(&b.roll_no.to_lowercase()),
        SortKey::Attendance => a.attendance.total_cmp(&b.attendance),
        SortKey::Marks => a.marks.total_cmp(&b.marks),
    }
}
