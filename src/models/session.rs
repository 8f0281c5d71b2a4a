use serde::{Deserialize, Serialize};

use super::user::User;

/// The active login.
///
/// The client holds at most one. A present, non-empty `token` is the only
/// signal of being logged in; it is never verified locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The bearer token sent with every request.
    pub token: String,
    /// The user returned at login.
    pub user: User,
}
