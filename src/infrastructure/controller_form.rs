use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use tokio::sync::Mutex;

use crate::{
    ControllerSnapshot, FormError, Notice, StdResult, SubmitRequest, User, UserForm,
    UserFormController, UserGateway, UserId, UserView,
};

/// The question asked before deleting a user.
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this user?";

const LOADING_MESSAGE: &str = "Loading users...";
const DELETE_ERROR_MESSAGE: &str = "Error deleting user";

#[derive(Debug, Default)]
struct FormControllerState {
    users: Vec<User>,
    form: UserForm,
    notice: Option<Notice>,
}

impl FormControllerState {
    fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    /// Schedules the current notice to disappear.
    fn hide_notice(&mut self) {
        if let Some(notice) = self.notice.as_mut() {
            notice.hide_from(Utc::now());
        }
    }
}

/// A controller binding a user table and a two-mode form to the backend.
///
/// Operations run one at a time: each one holds the state lock for its whole duration,
/// network calls included.
pub struct FormController {
    gateway: Arc<dyn UserGateway>,
    view: Arc<dyn UserView>,
    backend_label: String,
    state: Mutex<FormControllerState>,
}

impl FormController {
    /// Creates a new `FormController` instance.
    ///
    /// The backend label names the backend in connectivity error messages.
    pub fn new(
        gateway: Arc<dyn UserGateway>,
        view: Arc<dyn UserView>,
        backend_label: &str,
    ) -> Self {
        Self {
            gateway,
            view,
            backend_label: backend_label.to_string(),
            state: Mutex::new(FormControllerState::default()),
        }
    }

    async fn show_notice(&self, state: &mut FormControllerState, notice: Notice) -> StdResult<()> {
        self.view.show_notice(&notice).await?;
        state.notice = Some(notice);

        Ok(())
    }

    /// Reloads the user list. A quiet refresh keeps the current notice unless it fails.
    async fn refresh(&self, state: &mut FormControllerState, quiet: bool) -> StdResult<()> {
        if !quiet {
            self.show_notice(state, Notice::success(LOADING_MESSAGE))
                .await?;
        }
        match self.gateway.list_users().await {
            Ok(users) => {
                state.users = users;
                self.view.render_users(&state.users).await?;
                state.hide_notice();
            }
            Err(e) => {
                error!("Error loading users: {e:?}");
                let message = format!(
                    "Error loading users. Make sure the backend is reachable at {}.",
                    self.backend_label
                );
                self.show_notice(state, Notice::error(message)).await?;
            }
        }

        Ok(())
    }

    async fn reset(&self, state: &mut FormControllerState) -> StdResult<()> {
        state.form.reset();
        self.view.render_form(&state.form).await?;
        state.hide_notice();

        Ok(())
    }
}

#[async_trait::async_trait]
impl UserFormController for FormController {
    async fn load_users(&self) -> StdResult<()> {
        let mut state = self.state.lock().await;

        self.refresh(&mut state, false).await
    }

    async fn edit_user(&self, id: UserId) -> StdResult<()> {
        let mut state = self.state.lock().await;
        let Some(user) = state.find_user(id).cloned() else {
            return self
                .show_notice(&mut state, Notice::error(FormError::UnknownUser(id).to_string()))
                .await;
        };
        info!("Editing {user}");
        state.form.edit(&user);

        self.view.render_form(&state.form).await
    }

    async fn input_id(&self, input: &str) -> StdResult<()> {
        let mut state = self.state.lock().await;
        if !state.form.set_id_input(input) {
            return self
                .show_notice(&mut state, Notice::error(FormError::ReadOnlyId.to_string()))
                .await;
        }

        Ok(())
    }

    async fn input_name(&self, input: &str) -> StdResult<()> {
        let mut state = self.state.lock().await;
        state.form.set_name_input(input);

        Ok(())
    }

    async fn submit(&self) -> StdResult<()> {
        let mut state = self.state.lock().await;
        let Some(request) = SubmitRequest::from_form(&state.form) else {
            return self
                .show_notice(&mut state, Notice::error(FormError::EmptyName.to_string()))
                .await;
        };
        info!("Submitting {request}");
        let outcome = match &request {
            SubmitRequest::Add(draft) => self
                .gateway
                .add_user(draft)
                .await
                .map(|added| format!("User \"{}\" added successfully!", added.name())),
            SubmitRequest::Update(draft) => self
                .gateway
                .update_user(draft)
                .await
                .map(|updated| format!("User \"{}\" updated successfully!", updated.name())),
        };
        match outcome {
            Ok(message) => {
                self.show_notice(&mut state, Notice::success(message))
                    .await?;
                self.reset(&mut state).await?;
                self.refresh(&mut state, true).await
            }
            Err(e) => {
                error!("Error submitting {request}: {e:?}");
                self.show_notice(&mut state, Notice::error(format!("Error: {e}")))
                    .await
            }
        }
    }

    async fn reset_form(&self) -> StdResult<()> {
        let mut state = self.state.lock().await;

        self.reset(&mut state).await
    }

    async fn delete_user(&self, id: UserId) -> StdResult<()> {
        let mut state = self.state.lock().await;
        if !self.view.confirm(DELETE_CONFIRMATION_PROMPT).await? {
            info!("Deletion of user {id} cancelled");
            return Ok(());
        }
        match self.gateway.delete_user(id).await {
            Ok(receipt) => {
                self.show_notice(&mut state, Notice::success(receipt.message()))
                    .await?;
                self.refresh(&mut state, true).await
            }
            Err(e) => {
                error!("Error deleting user {id}: {e:?}");
                self.show_notice(&mut state, Notice::error(DELETE_ERROR_MESSAGE))
                    .await
            }
        }
    }

    async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.lock().await;
        let now = Utc::now();

        ControllerSnapshot {
            users: state.users.clone(),
            form: state.form.clone(),
            notice: state
                .notice
                .clone()
                .filter(|notice| notice.is_visible_at(now)),
        }
    }
}
