use serde::{Deserialize, Serialize};

use crate::entities::users;

/// Role given to every account created through registration.
pub const DEFAULT_ROLE: &str = "admin";

/// Identity stored in the session after a successful login and handed to
/// protected handlers as a request extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub avatar: Option<String>,
}

impl From<users::Model> for SessionUser {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: model.role,
            avatar: model.avatar,
        }
    }
}
