use crate::config::SecurityConfig;
use crate::models::student::{RosterQuery, RosterStats, Student, StudentFields};
use crate::models::user::SessionUser;
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn student_repo(&self) -> repositories::student::StudentRepository {
        repositories::student::StudentRepository::new(self.conn.clone())
    }

    pub async fn create_user(&self, username: &str, password_hash: String) -> Result<i32> {
        self.user_repo().create(username, password_hash).await
    }

    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<SessionUser>> {
        self.user_repo()
            .verify_password(username, password, security)
            .await
    }

    pub async fn user_count(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn insert_student(&self, fields: &StudentFields) -> Result<i32> {
        self.student_repo().insert(fields).await
    }

    pub async fn update_student(&self, id: i32, fields: &StudentFields) -> Result<bool> {
        self.student_repo().update(id, fields).await
    }

    pub async fn delete_student(&self, id: i32) -> Result<bool> {
        self.student_repo().delete(id).await
    }

    pub async fn get_student(&self, id: i32) -> Result<Option<Student>> {
        self.student_repo().get(id).await
    }

    pub async fn student_count(&self) -> Result<u64> {
        self.student_repo().count().await
    }

    pub async fn list_students(&self, query: &RosterQuery) -> Result<(Vec<Student>, u64)> {
        self.student_repo().list(query).await
    }

    pub async fn roster_stats(&self) -> Result<RosterStats> {
        self.student_repo().stats().await
    }
}

/// True when any error in the chain is a unique-constraint violation.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<DbErr>().and_then(DbErr::sql_err),
            Some(SqlErr::UniqueConstraintViolation(_))
        )
    })
}
