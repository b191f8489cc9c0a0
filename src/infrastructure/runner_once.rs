use std::{fmt::Display, sync::Arc};

use anyhow::anyhow;
use log::info;

use crate::{FormMode, StdResult, UserFormController, UserId};

/// A single form operation run from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShotOperation {
    /// List all users.
    List,

    /// Add a user, with an optional raw id input.
    Add { id: Option<String>, name: String },

    /// Rename a listed user.
    Update { id: UserId, name: String },

    /// Delete a user after confirmation.
    Delete(UserId),
}

impl Display for OneShotOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Add { id, name } => write!(f, "add: id={id:?}, name={name}"),
            Self::Update { id, name } => write!(f, "update: id={id}, name={name}"),
            Self::Delete(id) => write!(f, "delete: id={id}"),
        }
    }
}

/// Runs one operation through a form controller and turns an error notice into a failure.
pub struct OneShotRunner {
    controller: Arc<dyn UserFormController>,
}

impl OneShotRunner {
    /// Creates a new `OneShotRunner` instance.
    pub fn new(controller: Arc<dyn UserFormController>) -> Self {
        Self { controller }
    }

    /// Runs the operation, failing when it ends on an error notice.
    pub async fn run(&self, operation: OneShotOperation) -> StdResult<()> {
        info!("Running {operation}");
        self.execute(operation).await?;

        match self.controller.snapshot().await.notice {
            Some(notice) if notice.is_error() => Err(anyhow!(notice.text().to_string())),
            _ => Ok(()),
        }
    }

    async fn has_error_notice(&self) -> bool {
        self.controller
            .snapshot()
            .await
            .notice
            .is_some_and(|notice| notice.is_error())
    }

    async fn execute(&self, operation: OneShotOperation) -> StdResult<()> {
        match operation {
            OneShotOperation::List => self.controller.load_users().await,
            OneShotOperation::Add { id, name } => {
                self.controller
                    .input_id(id.as_deref().unwrap_or_default())
                    .await?;
                self.controller.input_name(&name).await?;
                self.controller.submit().await
            }
            OneShotOperation::Update { id, name } => {
                self.controller.load_users().await?;
                if self.has_error_notice().await {
                    return Ok(());
                }
                self.controller.edit_user(id).await?;
                if self.controller.snapshot().await.form.mode() != FormMode::Edit {
                    return Ok(());
                }
                self.controller.input_name(&name).await?;
                self.controller.submit().await
            }
            OneShotOperation::Delete(id) => self.controller.delete_user(id).await,
        }
    }
}
