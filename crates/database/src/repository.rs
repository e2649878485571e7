use crate::DbError;
use async_trait::async_trait;
use core_types::{NewStudent, StudentPatch, StudentRecord};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// The create/read/update/delete interface every record store provides.
///
/// Operations are direct passthroughs: the only rule a store enforces is that
/// a created record carries all four fields.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Returns every record in insertion order.
    async fn list_students(&self) -> Result<Vec<StudentRecord>, DbError>;

    /// Validates and stores a new record, assigning its identifier.
    async fn create_student(&self, new: NewStudent) -> Result<StudentRecord, DbError>;

    /// Applies `patch` to the record with `id`. Returns `None` when no such
    /// record exists; never creates one.
    async fn update_student(&self, id: Uuid, patch: StudentPatch) -> Result<Option<StudentRecord>, DbError>;

    /// Removes the record with `id`, returning whether one was removed.
    async fn delete_student(&self, id: Uuid) -> Result<bool, DbError>;
}

/// The JSONB body stored for each student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentDocument {
    name: String,
    roll_no: String,
    attendance: f64,
    marks: f64,
}

impl From<&StudentRecord> for StudentDocument {
    fn from(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            roll_no: record.roll_no.clone(),
            attendance: record.attendance,
            marks: record.marks,
        }
    }
}

/// The JSONB object merged into a stored document on update. Absent fields
/// and values JSON cannot carry (`null`) are left out, so they keep their
/// stored value instead of overwriting it.
fn patch_document(patch: &StudentPatch) -> Result<serde_json::Value, DbError> {
    let mut document = serde_json::to_value(patch)?;
    if let serde_json::Value::Object(fields) = &mut document {
        fields.retain(|_, value| !value.is_null());
    }
    Ok(document)
}

// A row of the `students` table.
#[derive(FromRow, Debug)]
struct StudentRow {
    id: Uuid,
    document: Json<StudentDocument>,
}

impl From<StudentRow> for StudentRecord {
    fn from(row: StudentRow) -> Self {
        let StudentDocument {
            name,
            roll_no,
            attendance,
            marks,
        } = row.document.0;
        StudentRecord {
            id: row.id,
            name,
            roll_no,
            attendance,
            marks,
        }
    }
}

/// A `StudentStore` backed by PostgreSQL, holding one JSONB document per student.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for DbRepository {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, DbError> {
        let rows = sqlx::query_as::<_, StudentRow>("SELECT id, document FROM students ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(StudentRecord::from).collect())
    }

    async fn create_student(&self, new: NewStudent) -> Result<StudentRecord, DbError> {
        let record = StudentRecord::from_new(Uuid::new_v4(), new)?;

        sqlx::query("INSERT INTO students (id, document) VALUES ($1, $2)")
            .bind(record.id)
            .bind(Json(StudentDocument::from(&record)))
            .execute(&self.pool)
            .await?;

        Ok(record)
    }

    async fn update_student(&self, id: Uuid, patch: StudentPatch) -> Result<Option<StudentRecord>, DbError> {
        let document = patch_document(&patch)?;
        tracing::debug!(%id, %document, "Merging student patch.");

        // `||` merges top-level keys, so only the fields present in the patch change.
        let row = sqlx::query_as::<_, StudentRow>(
            "UPDATE students SET document = document || $2 WHERE id = $1 RETURNING id, document",
        )
        .bind(id)
        .bind(&document)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StudentRecord::from))
    }

    async fn delete_student(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{connect, run_migrations};
    use configuration::DatabaseConfig;

    #[tokio::test]
    #[ignore = "requires a PostgreSQL instance in DATABASE_URL"]
    async fn postgres_round_trip() {
        let pool = connect(&DatabaseConfig::default()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = DbRepository::new(pool);

        let created = repo
            .create_student(NewStudent::new("Alice Roy", "R1", 80.0, 35.0))
            .await
            .unwrap();
        let second = repo
            .create_student(NewStudent::new("Bo Lin", "R2", 60.0, 70.0))
            .await
            .unwrap();
        let ids: Vec<Uuid> = repo.list_students().await.unwrap().iter().map(|s| s.id).collect();
        let first_at = ids.iter().position(|id| *id == created.id).unwrap();
        let second_at = ids.iter().position(|id| *id == second.id).unwrap();
        assert!(first_at < second_at);

        let updated = repo
            .update_student(
                created.id,
                StudentPatch {
                    marks: Some(55.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.marks, 55.0);
        assert_eq!(updated.name, "Alice Roy");

        assert_eq!(updated.roll_no, "R1");
        assert!(repo.update_student(Uuid::new_v4(), StudentPatch::default()).await.unwrap().is_none());

        assert!(repo.delete_student(created.id).await.unwrap());
        assert!(repo.delete_student(second.id).await.unwrap());
        assert!(!repo.list_students().await.unwrap().iter().any(|s| s.id == created.id));
    }

    #[test]
    fn patch_document_holds_only_present_fields() {
        let patch = StudentPatch {
            roll_no: Some("R7".to_string()),
            marks: Some(55.0),
            ..Default::default()
        };
        assert_eq!(
            patch_document(&patch).unwrap(),
            serde_json::json!({"rollNo": "R7", "marks": 55.0})
        );
        assert_eq!(patch_document(&StudentPatch::default()).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn patch_document_drops_values_json_cannot_hold() {
        let patch = StudentPatch {
            attendance: Some(f64::NAN),
            marks: Some(12.5),
            ..Default::default()
        };
        assert_eq!(patch_document(&patch).unwrap(), serde_json::json!({"marks": 12.5}));
    }

    #[test]
    fn document_keeps_wire_field_names() {
        let record = StudentRecord::from_new(Uuid::new_v4(), NewStudent::new("Bo", "R2", 50.0, 60.0)).unwrap();
        let json = serde_json::to_value(StudentDocument::from(&record)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Bo", "rollNo": "R2", "attendance": 50.0, "marks": 60.0}));
    }
}
