use chatsync_api::{AuthToken, User, UserId};
use serde::{Deserialize, Serialize};

/// The signed-in user plus the credential issued for them.
///
/// Serialized as the flat `userInfo` record: the user fields and a `token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    #[serde(flatten)]
    pub user: User,
    pub token: AuthToken,
}

impl CurrentUser {
    pub fn new(user: User, token: AuthToken) -> Self {
        Self { user, token }
    }

    pub fn id(&self) -> &UserId {
        &self.user.id
    }
}
