use serde::{Deserialize, Serialize};

/// User record stored in redb
///
/// Immutable after registration; users are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// PBKDF2-SHA256 hash in PHC string format, never the plain password
    pub password_hash: String,
    /// When the user was created (Unix timestamp)
    pub created_at: i64,
}

impl UserRecord {
    /// Validate a username submitted at registration
    pub fn validate_username(username: &str) -> bool {
        !username.trim().is_empty()
    }
}
