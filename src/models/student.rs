use serde::{Deserialize, Serialize};

use crate::entities::students;

pub const GENDER_MALE: &str = "Male";
pub const GENDER_FEMALE: &str = "Female";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub matric_no: String,
    pub department: Option<String>,
    pub faculty: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<students::Model> for Student {
    fn from(model: students::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            matric_no: model.matric_no,
            department: model.department,
            faculty: model.faculty,
            gender: model.gender,
            level: model.level,
            dob: model.dob,
            phone: model.phone,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Raw create/update request as submitted by an operator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentInput {
    pub id: Option<i32>,
    pub name: String,
    pub matric_no: String,
    pub gender: String,
    pub department: String,
    pub faculty: String,
    pub level: String,
    pub dob: String,
    pub phone: String,
}

/// Trimmed column values ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub matric_no: String,
    pub gender: Option<String>,
    pub department: Option<String>,
    pub faculty: Option<String>,
    pub level: Option<String>,
    pub dob: Option<String>,
    pub phone: Option<String>,
}

impl StudentInput {
    /// Trims every field. Optional fields that end up empty become `None`.
    #[must_use]
    pub fn into_fields(self) -> StudentFields {
        StudentFields {
            name: self.name.trim().to_string(),
            matric_no: self.matric_no.trim().to_string(),
            gender: non_empty(&self.gender),
            department: non_empty(&self.department),
            faculty: non_empty(&self.faculty),
            level: non_empty(&self.level),
            dob: non_empty(&self.dob),
            phone: non_empty(&self.phone),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Result of a successful upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created { id: i32 },
    /// `matched` is false when no record had the given id; that is not an error.
    Updated { id: i32, matched: bool },
}

/// Listing request for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery {
    /// Case-insensitive substring over name, matric number, department and faculty.
    pub q: Option<String>,
    /// Exact gender match.
    pub gender: Option<String>,
    /// 1-based.
    pub page: u64,
    pub per_page: u64,
}

impl RosterQuery {
    #[must_use]
    pub fn new(q: Option<&str>, gender: Option<&str>, page: u64, per_page: u64) -> Self {
        Self {
            q: q.and_then(non_empty),
            gender: gender.and_then(non_empty),
            page: page.max(1),
            per_page,
        }
    }

    /// `(offset, limit)` of the requested page, or `None` when there is
    /// nothing to fetch: a zero page size, or a page past the largest row
    /// offset SQLite can bind.
    #[must_use]
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.per_page == 0 || self.per_page > MAX_SQL_INT {
            return None;
        }
        let offset = self
            .page
            .saturating_sub(1)
            .checked_mul(self.per_page)
            .filter(|offset| *offset <= MAX_SQL_INT)?;
        Some((offset, self.per_page))
    }
}

/// SQLite binds integers as `i64`.
const MAX_SQL_INT: u64 = i64::MAX.unsigned_abs();

/// Whole-table aggregates. Never affected by the listing filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub departments: u64,
    pub faculties: u64,
    pub male: u64,
    pub female: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterPage {
    pub records: Vec<Student>,
    /// Records matching the filters, across all pages.
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub stats: RosterStats,
}

/// `ceil(total / per_page)`, never below 1. A zero page size yields 1.
#[must_use]
pub const fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 1;
    }
    let pages = total.div_ceil(per_page);
    if pages == 0 { 1 } else { pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(25, 0), 1);
        assert_eq!(total_pages(0, 0), 1);
    }

    #[test]
    fn test_roster_query_drops_blank_filters() {
        let query = RosterQuery::new(Some("   "), Some(" Female "), 0, 10);
        assert_eq!(query.q, None);
        assert_eq!(query.gender.as_deref(), Some("Female"));
        assert_eq!(query.page, 1);
        assert_eq!(query.window(), Some((0, 10)));
    }

    #[test]
    fn test_roster_query_window() {
        let query = RosterQuery::new(None, None, 3, 10);
        assert_eq!(query.window(), Some((20, 10)));

        let query = RosterQuery::new(None, None, 7, 0);
        assert_eq!(query.window(), None);
    }

    #[test]
    fn test_window_rejects_unbindable_pages() {
        assert_eq!(RosterQuery::new(None, None, u64::MAX, 10).window(), None);
        assert_eq!(RosterQuery::new(None, None, 2, u64::MAX).window(), None);

        // Last page whose offset still fits in an i64.
        let last = i64::MAX.unsigned_abs() / 10 + 1;
        assert_eq!(
            RosterQuery::new(None, None, last, 10).window(),
            Some(((last - 1) * 10, 10))
        );
        assert_eq!(RosterQuery::new(None, None, last + 1, 10).window(), None);
    }

    #[test]
    fn test_into_fields_trims() {
        let input = StudentInput {
            id: None,
            name: "  Ada Obi ".to_string(),
            matric_no: " CSC/001 ".to_string(),
            gender: "Female".to_string(),
            department: "   ".to_string(),
            ..Default::default()
        };

        let fields = input.into_fields();
        assert_eq!(fields.name, "Ada Obi");
        assert_eq!(fields.matric_no, "CSC/001");
        assert_eq!(fields.gender.as_deref(), Some("Female"));
        assert_eq!(fields.department, None);
        assert_eq!(fields.phone, None);
    }
}
