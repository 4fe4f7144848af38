//! Domain service for the student roster.
//!
//! Listing (search, gender filter, paging, global stats) and the
//! create/update/delete paths used by the dashboard.

use thiserror::Error;

use crate::models::student::{RosterPage, RosterQuery, StudentInput, UpsertOutcome};

#[derive(Debug, Error)]
pub enum StudentError {
    #[error("{0}")]
    Validation(String),

    #[error("Matric No already exists!")]
    Conflict,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for StudentError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StudentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait StudentService: Send + Sync {
    /// Returns one page of matching records plus unfiltered stats.
    async fn list(&self, query: &RosterQuery) -> Result<RosterPage, StudentError>;

    /// Inserts when `input.id` is `None`, otherwise overwrites that record.
    ///
    /// # Errors
    ///
    /// Returns [`StudentError::Validation`] if name or matric number is blank
    /// and [`StudentError::Conflict`] if the matric number belongs to
    /// another record.
    async fn upsert(&self, input: StudentInput) -> Result<UpsertOutcome, StudentError>;

    /// Deleting an unknown id is not an error. Returns whether a row went away.
    async fn delete(&self, id: i32) -> Result<bool, StudentError>;
}
