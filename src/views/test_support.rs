use api_client::{error::ApiError, StudentApi};
use async_trait::async_trait;
use core_types::{DeleteConfirmation, NewStudent, StudentPatch, StudentRecord};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// An in-process `StudentApi` that records how often the list was fetched.
#[derive(Default)]
pub struct FakeApi {
    pub students: Mutex<Vec<StudentRecord>>,
    pub list_calls: AtomicUsize,
    pub mutations: AtomicUsize,
    pub fail: bool,
}

impl FakeApi {
    pub fn with(students: Vec<StudentRecord>) -> Self {
        Self {
            students: Mutex::new(students),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Vec<StudentRecord> {
        self.students.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail {
            Err(ApiError::ApiError {
                status: 500,
                message: "store offline".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

pub fn record(name: &str, roll_no: &str, attendance: f64, marks: f64) -> StudentRecord {
    StudentRecord::from_new(Uuid::new_v4(), NewStudent::new(name, roll_no, attendance, marks)).unwrap()
}

#[async_trait]
impl StudentApi for FakeApi {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.snapshot())
    }

    async fn create_student(&self, student: &NewStudent) -> Result<StudentRecord, ApiError> {
        self.check()?;
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let record = StudentRecord::from_new(Uuid::new_v4(), student.clone()).map_err(|e| ApiError::ApiError {
            status: 400,
            message: e.to_string(),
        })?;
        self.students.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_student(&self, id: Uuid, patch: &StudentPatch) -> Result<Option<StudentRecord>, ApiError> {
        self.check()?;
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut students = self.students.lock().unwrap();
        Ok(students.iter_mut().find(|s| s.id == id).map(|s| {
            s.apply(patch.clone());
            s.clone()
        }))
    }

    async fn delete_student(&self, id: Uuid) -> Result<DeleteConfirmation, ApiError> {
        self.check()?;
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.students.lock().unwrap().retain(|s| s.id != id);
        Ok(DeleteConfirmation::student_deleted())
    }
}
