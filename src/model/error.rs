use thiserror::Error;

use super::UserId;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// Form error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    /// The trimmed name input is empty
    #[error("Please enter a valid name")]
    EmptyName,
    /// The id input can not be changed while editing
    #[error("The user id can not be changed while editing")]
    ReadOnlyId,
    /// The user is not part of the loaded list
    #[error("User {0} is not in the list, refresh and try again")]
    UnknownUser(UserId),
}
