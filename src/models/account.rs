use sqlx::FromRow;

/// A registered account as held by the credential store.
///
/// Deliberately not `Serialize`: the password hash must never leave the server.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

impl Account {
    /// Case-insensitive username comparison, as used for uniqueness and login lookups.
    /// Only ASCII letters fold, matching the characters a username may contain.
    pub fn matches_username(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username)
    }
}
