use std::fmt::Write;

use super::{attr, flash_list, layout, text};
use crate::api::flash::Flash;
use crate::models::student::{GENDER_FEMALE, GENDER_MALE, RosterPage, RosterQuery, Student};

/// Page links shown on each side of the current page.
const PAGE_WINDOW: u64 = 3;

pub struct DashboardView<'a> {
    pub username: &'a str,
    pub avatar: &'a str,
    pub query: &'a RosterQuery,
    pub roster: &'a RosterPage,
    pub flashes: &'a [Flash],
}

/// Link to another page of the current listing, keeping search and filters.
#[must_use]
pub fn page_href(query: &RosterQuery, page: u64) -> String {
    let mut href = format!("/dashboard?page={page}&per_page={}", query.per_page);
    if let Some(q) = &query.q {
        let _ = write!(href, "&q={}", urlencoding::encode(q));
    }
    if let Some(gender) = &query.gender {
        let _ = write!(href, "&gender={}", urlencoding::encode(gender));
    }
    href
}

fn opt(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// The two stat buckets, plus the current value when it is anything else,
/// so re-submitting a form never drops a stored gender.
fn gender_options(selected: Option<&str>, any_label: &str) -> String {
    let mut out = format!("<option value=\"\">{any_label}</option>");
    for gender in [GENDER_MALE, GENDER_FEMALE] {
        let marker = if selected == Some(gender) {
            " selected"
        } else {
            ""
        };
        let _ = write!(out, "<option value=\"{gender}\"{marker}>{gender}</option>");
    }
    if let Some(other) = selected.filter(|g| ![GENDER_MALE, GENDER_FEMALE].contains(g)) {
        let _ = write!(
            out,
            "<option value=\"{}\" selected>{}</option>",
            attr(other),
            text(other)
        );
    }
    out
}

fn stats_cards(roster: &RosterPage) -> String {
    let stats = &roster.stats;
    let mut out = String::from("<section class=\"stats\">");
    for (label, value) in [
        ("Total Students", roster.total),
        ("Departments", stats.departments),
        ("Faculties", stats.faculties),
        ("Male", stats.male),
        ("Female", stats.female),
    ] {
        let _ = write!(
            out,
            "<div class=\"card\"><strong>{value}</strong>{label}</div>"
        );
    }
    out.push_str("</section>");
    out
}

fn search_form(query: &RosterQuery) -> String {
    format!(
        "<form class=\"card inline\" method=\"get\" action=\"/dashboard\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search name, matric no, department, faculty\" value=\"{q}\">\
         <select name=\"gender\">{genders}</select>\
         <label>Per page <input type=\"number\" name=\"per_page\" min=\"0\" value=\"{per_page}\"></label>\
         <button type=\"submit\">Search</button>\
         <a href=\"/dashboard\">Reset</a>\
         </form>",
        q = attr(query.q.as_deref().unwrap_or("")),
        genders = gender_options(query.gender.as_deref(), "All genders"),
        per_page = query.per_page,
    )
}

/// Add form when `student` is `None`, edit form otherwise.
fn student_form(student: Option<&Student>) -> String {
    let field = |name: &str, label: &str, value: &str, required: bool| {
        format!(
            "<input type=\"text\" name=\"{name}\" placeholder=\"{label}\" value=\"{}\"{}>",
            attr(value),
            if required { " required" } else { "" }
        )
    };

    let (id, submit) = student.map_or((String::new(), "Add Student"), |s| {
        (s.id.to_string(), "Save")
    });

    format!(
        "<form class=\"inline\" method=\"post\" action=\"/dashboard\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         {name}{matric}<select name=\"gender\">{genders}</select>{department}{faculty}{level}\
         {dob}{phone}\
         <button type=\"submit\">{submit}</button></form>",
        name = field("name", "Full name", student.map_or("", |s| s.name.as_str()), true),
        matric = field(
            "matric_no",
            "Matric No",
            student.map_or("", |s| s.matric_no.as_str()),
            true
        ),
        genders = gender_options(
            student.and_then(|s| s.gender.as_deref()),
            "Gender"
        ),
        department = field(
            "department",
            "Department",
            opt(student.and_then(|s| s.department.as_ref())),
            false
        ),
        faculty = field(
            "faculty",
            "Faculty",
            opt(student.and_then(|s| s.faculty.as_ref())),
            false
        ),
        level = field(
            "level",
            "Level",
            opt(student.and_then(|s| s.level.as_ref())),
            false
        ),
        dob = field(
            "dob",
            "Date of birth",
            opt(student.and_then(|s| s.dob.as_ref())),
            false
        ),
        phone = field(
            "phone",
            "Phone",
            opt(student.and_then(|s| s.phone.as_ref())),
            false
        ),
    )
}

fn student_rows(records: &[Student]) -> String {
    if records.is_empty() {
        return "<tr><td colspan=\"9\">No students found.</td></tr>".to_string();
    }

    records.iter().fold(String::new(), |mut out, s| {
        let _ = write!(
            out,
            "<tr><td>{name}</td><td>{matric}</td><td>{department}</td><td>{faculty}</td>\
             <td>{gender}</td><td>{level}</td><td>{dob}</td><td>{phone}</td>\
             <td><details><summary>Edit</summary>{edit}</details>\
             <a href=\"/delete_student/{id}\">Delete</a></td></tr>",
            name = text(&s.name),
            matric = text(&s.matric_no),
            department = text(opt(s.department.as_ref())),
            faculty = text(opt(s.faculty.as_ref())),
            gender = text(opt(s.gender.as_ref())),
            level = text(opt(s.level.as_ref())),
            dob = text(opt(s.dob.as_ref())),
            phone = text(opt(s.phone.as_ref())),
            edit = student_form(Some(s)),
            id = s.id,
        );
        out
    })
}

fn pagination(query: &RosterQuery, roster: &RosterPage) -> String {
    let mut out = String::from("<nav class=\"pagination\">");

    if roster.page > 1 {
        let _ = write!(
            out,
            "<a href=\"{}\">&laquo; Prev</a>",
            attr(&page_href(query, roster.page - 1))
        );
    }

    let first = roster.page.saturating_sub(PAGE_WINDOW).max(1);
    let last = roster.page.saturating_add(PAGE_WINDOW).min(roster.total_pages);

    for page in first..=last {
        if page == roster.page {
            let _ = write!(out, "<span><strong>{page}</strong></span>");
        } else {
            let _ = write!(
                out,
                "<a href=\"{}\">{page}</a>",
                attr(&page_href(query, page))
            );
        }
    }

    if roster.page < roster.total_pages {
        let _ = write!(
            out,
            "<a href=\"{}\">Next &raquo;</a>",
            attr(&page_href(query, roster.page + 1))
        );
    }

    out.push_str("</nav>");
    out
}

#[must_use]
pub fn render(view: &DashboardView<'_>) -> String {
    let body = format!(
        "<header><div><img src=\"{avatar}\" alt=\"avatar\">{username}</div>\
         <nav><a href=\"/logout\">Log out</a></nav></header>\n\
         <main>\n{flashes}\n{stats}\n{search}\n\
         <section class=\"card\"><h2>Add Student</h2>{add}</section>\n\
         <section class=\"card\"><table>\
         <thead><tr><th>Name</th><th>Matric No</th><th>Department</th><th>Faculty</th>\
         <th>Gender</th><th>Level</th><th>Date of Birth</th><th>Phone</th><th></th></tr></thead>\
         <tbody>{rows}</tbody></table>\n{pages}</section>\n</main>",
        avatar = attr(view.avatar),
        username = text(view.username),
        flashes = flash_list(view.flashes),
        stats = stats_cards(view.roster),
        search = search_form(view.query),
        add = student_form(None),
        rows = student_rows(&view.roster.records),
        pages = pagination(view.query, view.roster),
    );

    layout("Student Dashboard", &body)
}
