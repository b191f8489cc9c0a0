use crate::{DeleteReceipt, StdResult, User, UserDraft, UserId};

/// A trait for reaching the user-management backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserGateway: Sync + Send {
    /// Retrieves every user known to the backend.
    async fn list_users(&self) -> StdResult<Vec<User>>;

    /// Retrieves a single user.
    async fn get_user(&self, id: UserId) -> StdResult<User>;

    /// Creates a user and returns the record echoed by the backend.
    async fn add_user(&self, user: &UserDraft) -> StdResult<UserDraft>;

    /// Updates a user and returns the record echoed by the backend.
    async fn update_user(&self, user: &UserDraft) -> StdResult<UserDraft>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> StdResult<DeleteReceipt>;
}
