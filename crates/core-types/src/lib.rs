pub mod enums;
pub mod error;
pub mod student;

// Re-export the core types to provide a clean public API.
pub use enums::{AttendanceBand, ResultStatus, SortKey, SortOrder};
pub use error::CoreError;
pub use student::{DeleteConfirmation, NewStudent, StudentPatch, StudentRecord, PASS_MARK};
