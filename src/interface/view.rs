use crate::{Notice, StdResult, User, UserForm};

/// A trait for presenting the controller state and asking the user for confirmation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserView: Sync + Send {
    /// Renders the user list, replacing any previous rendering.
    async fn render_users(&self, users: &[User]) -> StdResult<()>;

    /// Renders the form.
    async fn render_form(&self, form: &UserForm) -> StdResult<()>;

    /// Shows a notice.
    async fn show_notice(&self, notice: &Notice) -> StdResult<()>;

    /// Asks a yes/no question.
    async fn confirm(&self, prompt: &str) -> StdResult<bool>;
}
