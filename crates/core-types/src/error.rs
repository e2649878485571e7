use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Student validation failed: missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}
