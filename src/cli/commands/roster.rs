//! List students command handler

use crate::config::Config;
use crate::models::student::RosterQuery;
use crate::state::SharedState;

pub async fn cmd_list_students(
    config: &Config,
    q: Option<&str>,
    gender: Option<&str>,
    page: u64,
    per_page: Option<u64>,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let per_page = per_page
        .unwrap_or(config.dashboard.default_per_page)
        .min(config.dashboard.max_per_page);
    let query = RosterQuery::new(q, gender, page, per_page);

    let roster = state.student_service.list(&query).await?;

    println!(
        "Students: {} matching | Departments: {} | Faculties: {} | Male: {} | Female: {}",
        roster.total,
        roster.stats.departments,
        roster.stats.faculties,
        roster.stats.male,
        roster.stats.female
    );
    println!("{:-<78}", "");

    if roster.records.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    for student in &roster.records {
        println!(
            "{:>5}  {:<14} {:<28} {:<8} {}",
            student.id,
            student.matric_no,
            student.name,
            student.gender.as_deref().unwrap_or("-"),
            student.department.as_deref().unwrap_or("-"),
        );
    }

    println!();
    println!("Page {} of {}", roster.page, roster.total_pages);

    Ok(())
}
