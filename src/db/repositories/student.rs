use crate::entities::{prelude::*, students};
use crate::models::student::{
    GENDER_FEMALE, GENDER_MALE, RosterQuery, RosterStats, Student, StudentFields,
};
use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Repository for student records
pub struct StudentRepository {
    conn: DatabaseConnection,
}

/// Builds the listing predicate. Absent filters contribute nothing.
#[must_use]
pub fn roster_condition(query: &RosterQuery) -> Condition {
    let mut condition = Condition::all();

    if let Some(q) = &query.q {
        condition = condition.add(
            Condition::any()
                .add(students::Column::Name.contains(q.as_str()))
                .add(students::Column::MatricNo.contains(q.as_str()))
                .add(students::Column::Department.contains(q.as_str()))
                .add(students::Column::Faculty.contains(q.as_str())),
        );
    }

    if let Some(gender) = &query.gender {
        condition = condition.add(students::Column::Gender.eq(gender.as_str()));
    }

    condition
}

impl StudentRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn active_model(fields: &StudentFields, now: &str) -> students::ActiveModel {
        students::ActiveModel {
            name: Set(fields.name.clone()),
            matric_no: Set(fields.matric_no.clone()),
            department: Set(fields.department.clone()),
            faculty: Set(fields.faculty.clone()),
            gender: Set(fields.gender.clone()),
            level: Set(fields.level.clone()),
            dob: Set(fields.dob.clone()),
            phone: Set(fields.phone.clone()),
            updated_at: Set(now.to_string()),
            ..Default::default()
        }
    }

    pub async fn insert(&self, fields: &StudentFields) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut active_model = Self::active_model(fields, &now);
        active_model.created_at = Set(now);

        let res = Students::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to insert student")?;

        Ok(res.last_insert_id)
    }

    /// Overwrites every editable column. Returns false if no row has `id`.
    pub async fn update(&self, id: i32, fields: &StudentFields) -> Result<bool> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = Students::update_many()
            .set(Self::active_model(fields, &now))
            .filter(students::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update student")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete student")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Student>> {
        let row = Students::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Student::from))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Students::find().count(&self.conn).await?)
    }

    /// One page of matching records, newest first, plus the filtered total.
    pub async fn list(&self, query: &RosterQuery) -> Result<(Vec<Student>, u64)> {
        let select = Students::find().filter(roster_condition(query));

        let total = select
            .clone()
            .count(&self.conn)
            .await
            .context("Failed to count students")?;

        let Some((offset, limit)) = query.window() else {
            return Ok((Vec::new(), total));
        };

        let rows = select
            .order_by_desc(students::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list students")?;

        Ok((rows.into_iter().map(Student::from).collect(), total))
    }

    /// Aggregates over the whole table, ignoring any listing filter.
    pub async fn stats(&self) -> Result<RosterStats> {
        Ok(RosterStats {
            departments: self.count_distinct(students::Column::Department).await?,
            faculties: self.count_distinct(students::Column::Faculty).await?,
            male: self.count_gender(GENDER_MALE).await?,
            female: self.count_gender(GENDER_FEMALE).await?,
        })
    }

    async fn count_distinct(&self, column: students::Column) -> Result<u64> {
        let count: Option<i64> = Students::find()
            .select_only()
            .column_as(
                SimpleExpr::from(Func::count_distinct(Expr::col(column))),
                "count",
            )
            .into_tuple()
            .one(&self.conn)
            .await
            .context("Failed to count distinct values")?;

        Ok(count.and_then(|c| u64::try_from(c).ok()).unwrap_or(0))
    }

    async fn count_gender(&self, gender: &str) -> Result<u64> {
        Ok(Students::find()
            .filter(students::Column::Gender.eq(gender))
            .count(&self.conn)
            .await?)
    }
}
