pub mod prelude;

pub mod students;
pub mod users;
