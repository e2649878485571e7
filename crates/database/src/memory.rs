use crate::repository::StudentStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{NewStudent, StudentPatch, StudentRecord};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A process-local `StudentStore`. Used for development and tests; contents
/// are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    students: Arc<Mutex<Vec<StudentRecord>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryRepository {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, DbError> {
        Ok(self.students.lock().await.clone())
    }

    async fn create_student(&self, new: NewStudent) -> Result<StudentRecord, DbError> {
        let record = StudentRecord::from_new(Uuid::new_v4(), new)?;
        self.students.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_student(&self, id: Uuid, patch: StudentPatch) -> Result<Option<StudentRecord>, DbError> {
        let mut students = self.students.lock().await;
        Ok(students.iter_mut().find(|s| s.id == id).map(|student| {
            student.apply(patch);
            student.clone()
        }))
    }

    async fn delete_student(&self, id: Uuid) -> Result<bool, DbError> {
        let mut students = self.students.lock().await;
        let before = students.len();
        students.retain(|s| s.id != id);
        Ok(students.len() != before)
    }
}
