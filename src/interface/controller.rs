use crate::{Notice, StdResult, User, UserForm, UserId};

/// A snapshot of the controller state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerSnapshot {
    /// The last loaded user list.
    pub users: Vec<User>,

    /// The form.
    pub form: UserForm,

    /// The notice still visible, if any.
    pub notice: Option<Notice>,
}

/// A trait for the form-and-table controller.
///
/// Backend failures are reported through error notices, an `Err` means the view failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserFormController: Sync + Send {
    /// Loads the user list from the backend and renders it.
    async fn load_users(&self) -> StdResult<()>;

    /// Switches the form to edit mode for a listed user.
    async fn edit_user(&self, id: UserId) -> StdResult<()>;

    /// Sets the id input of the form.
    async fn input_id(&self, input: &str) -> StdResult<()>;

    /// Sets the name input of the form.
    async fn input_name(&self, input: &str) -> StdResult<()>;

    /// Submits the form, creating or updating a user.
    async fn submit(&self) -> StdResult<()>;

    /// Resets the form to create mode.
    async fn reset_form(&self) -> StdResult<()>;

    /// Deletes a user after confirmation.
    async fn delete_user(&self, id: UserId) -> StdResult<()>;

    /// Returns a snapshot of the controller state.
    async fn snapshot(&self) -> ControllerSnapshot;
}
