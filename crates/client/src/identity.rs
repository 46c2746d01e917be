/// The signed-in user, as returned by `POST /login`.
///
/// Only `user_id` travels with requests; `username` is kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

impl Identity {
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}
