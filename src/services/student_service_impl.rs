//! `SeaORM` implementation of the `StudentService` trait.

use crate::db::{Store, is_unique_violation};
use crate::models::student::{
    RosterPage, RosterQuery, StudentInput, UpsertOutcome, total_pages,
};
use crate::services::student_service::{StudentError, StudentService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmStudentService {
    store: Store,
}

impl SeaOrmStudentService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StudentService for SeaOrmStudentService {
    async fn list(&self, query: &RosterQuery) -> Result<RosterPage, StudentError> {
        let (records, total) = self.store.list_students(query).await?;
        let stats = self.store.roster_stats().await?;

        Ok(RosterPage {
            records,
            total,
            page: query.page,
            per_page: query.per_page,
            total_pages: total_pages(total, query.per_page),
            stats,
        })
    }

    async fn upsert(&self, input: StudentInput) -> Result<UpsertOutcome, StudentError> {
        let id = input.id;
        let fields = input.into_fields();

        if fields.name.is_empty() || fields.matric_no.is_empty() {
            return Err(StudentError::Validation(
                "Name and Matric No are required".to_string(),
            ));
        }

        let result = match id {
            Some(id) => self
                .store
                .update_student(id, &fields)
                .await
                .map(|matched| UpsertOutcome::Updated { id, matched }),
            None => self
                .store
                .insert_student(&fields)
                .await
                .map(|id| UpsertOutcome::Created { id }),
        };

        match result {
            Ok(outcome) => {
                match outcome {
                    UpsertOutcome::Created { id } => {
                        metrics::counter!("students_created_total").increment(1);
                        info!(student_id = id, "Student added: {}", fields.matric_no);
                    }
                    UpsertOutcome::Updated { id, matched } => {
                        metrics::counter!("students_updated_total").increment(1);
                        info!(student_id = id, matched, "Student updated: {}", fields.matric_no);
                    }
                }
                Ok(outcome)
            }
            Err(e) if is_unique_violation(&e) => Err(StudentError::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StudentError> {
        let removed = self.store.delete_student(id).await?;
        if removed {
            metrics::counter!("students_deleted_total").increment(1);
            info!(student_id = id, "Student deleted");
        }
        Ok(removed)
    }
}
