mod create_user;
mod init;
mod roster;

pub use create_user::cmd_create_user;
pub use init::cmd_init;
pub use roster::cmd_list_students;
