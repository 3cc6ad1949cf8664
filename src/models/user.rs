use crate::models::role::Role;
use serde::Serialize;

/// A registered portal user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
}

impl User {
    /// Contact address, ignoring blank values.
    pub fn contact(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}
