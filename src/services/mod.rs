pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod student_service;
pub use student_service::{StudentError, StudentService};

pub mod student_service_impl;
pub use student_service_impl::SeaOrmStudentService;
