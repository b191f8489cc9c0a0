use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The delay, in seconds, after which a hidden notice stops being visible.
pub const NOTICE_HIDE_DELAY_SECONDS: i64 = 3;

/// The identifier of a user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i32);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(UserId)
    }
}

/// The display name of a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(pub String);

impl Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// A user record as listed by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The identifier of the user.
    id: UserId,

    /// The name of the user.
    name: UserName,
}

impl User {
    /// Creates a new `User` instance.
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id: UserId(id),
            name: UserName(name.to_string()),
        }
    }

    /// Retrieves the user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Retrieves the user name.
    pub fn name(&self) -> &UserName {
        &self.name
    }
}

impl Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User: id={}, name={}", self.id, self.name)
    }
}

/// The kind of a notice, driving how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message shown to the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    text: String,
    kind: NoticeKind,
    expires_at: Option<DateTime<Utc>>,
}

impl Notice {
    /// Creates a success notice that stays visible until hidden or replaced.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
            expires_at: None,
        }
    }

    /// Creates an error notice that stays visible until hidden or replaced.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
            expires_at: None,
        }
    }

    /// Retrieves the text of the notice.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Retrieves the kind of the notice.
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Retrieves the expiry of the notice, if it has been hidden.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Schedules the notice to disappear [NOTICE_HIDE_DELAY_SECONDS] after `now`.
    ///
    /// An already scheduled expiry is kept.
    pub fn hide_from(&mut self, now: DateTime<Utc>) {
        if self.expires_at.is_none() {
            self.expires_at = Some(now + TimeDelta::seconds(NOTICE_HIDE_DELAY_SECONDS));
        }
    }

    /// Checks whether the notice is still visible at `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NoticeKind::Success => write!(f, "[ok] {}", self.text),
            NoticeKind::Error => write!(f, "[error] {}", self.text),
        }
    }
}

/// The mode of the user form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    /// The form creates a new user.
    #[default]
    Create,

    /// The form updates an existing user.
    Edit,
}

/// A two-mode form bound to a single user record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    mode: FormMode,
    id_input: String,
    name_input: String,
}

impl UserForm {
    /// Switches the form to edit mode, bound to the given user.
    pub fn edit(&mut self, user: &User) {
        self.mode = FormMode::Edit;
        self.id_input = user.id().to_string();
        self.name_input = user.name().to_string();
    }

    /// Switches the form back to create mode with empty inputs.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sets the raw id input. Returns `false` if the id is read-only.
    pub fn set_id_input(&mut self, input: &str) -> bool {
        if self.is_id_read_only() {
            return false;
        }
        self.id_input = input.to_string();

        true
    }

    /// Sets the raw name input.
    pub fn set_name_input(&mut self, input: &str) {
        self.name_input = input.to_string();
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn id_input(&self) -> &str {
        &self.id_input
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// The id read from the leading integer of the input, ignoring anything after it.
    ///
    /// Input without a leading integer, or one out of range, yields `None`.
    pub fn parsed_id(&self) -> Option<UserId> {
        let input = self.id_input.trim_start();
        let sign_length = usize::from(input.starts_with(['+', '-']));
        let digits_length = input[sign_length..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len() - sign_length);
        if digits_length == 0 {
            return None;
        }

        input[..sign_length + digits_length].parse().ok().map(UserId)
    }

    /// The name input with surrounding whitespace removed.
    pub fn trimmed_name(&self) -> &str {
        self.name_input.trim()
    }

    pub fn is_id_read_only(&self) -> bool {
        self.mode == FormMode::Edit
    }

    pub fn is_cancel_visible(&self) -> bool {
        self.mode == FormMode::Edit
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New User",
            FormMode::Edit => "Update User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add User",
            FormMode::Edit => "Update User",
        }
    }
}
