use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{FormMode, UserForm, UserId, UserName};

/// A user record submitted to the backend, and echoed back by it.
///
/// The identifier is optional: a record created without one gets its id from the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// The identifier of the user, `null` on the wire when absent.
    pub(crate) id: Option<UserId>,

    /// The name of the user.
    pub(crate) name: UserName,
}

impl UserDraft {
    /// Creates a new `UserDraft` with the given id and name.
    pub fn new(id: Option<i32>, name: &str) -> Self {
        Self {
            id: id.map(UserId),
            name: UserName(name.to_string()),
        }
    }

    /// Retrieves the identifier.
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Retrieves the name.
    pub fn name(&self) -> &UserName {
        &self.name
    }
}

impl Display for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "UserDraft: id={id}, name={}", self.name),
            None => write!(f, "UserDraft: id=<unset>, name={}", self.name),
        }
    }
}

/// A write request issued when the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// Create a new user.
    Add(UserDraft),

    /// Update an existing user.
    Update(UserDraft),
}

impl SubmitRequest {
    /// Builds the request for the current form, or `None` when the trimmed name is empty.
    pub fn from_form(form: &UserForm) -> Option<Self> {
        let name = form.trimmed_name();
        if name.is_empty() {
            return None;
        }
        let draft = UserDraft {
            id: form.parsed_id(),
            name: UserName(name.to_string()),
        };

        Some(match form.mode() {
            FormMode::Create => Self::Add(draft),
            FormMode::Edit => Self::Update(draft),
        })
    }
}

impl Display for SubmitRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add(draft) => write!(f, "Add {draft}"),
            Self::Update(draft) => write!(f, "Update {draft}"),
        }
    }
}
