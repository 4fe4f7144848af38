pub use super::students::Entity as Students;
pub use super::users::Entity as Users;
