use std::{io::Write, sync::Arc};

use log::{debug, info};
use tokio::io::AsyncBufRead;

use crate::{SHELL_HELP, ShellCommand, StdResult, TerminalView, UserFormController, UserView};

const SHELL_PROMPT: &str = "> ";
const SHELL_GREETING: &str = "User management console, type 'help' for the list of commands.";

/// An interactive shell driving a form controller from a terminal.
pub struct TerminalShell<R, W> {
    controller: Arc<dyn UserFormController>,
    view: Arc<TerminalView<R, W>>,
}

impl<R, W> TerminalShell<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Creates a new `TerminalShell` instance.
    ///
    /// The view must be the one the controller renders to, so that prompts and renderings interleave.
    pub fn new(controller: Arc<dyn UserFormController>, view: Arc<TerminalView<R, W>>) -> Self {
        Self { controller, view }
    }

    /// Loads the user list, then executes commands until `quit` or end of input.
    pub async fn run(&self) -> StdResult<()> {
        self.view.write_line(SHELL_GREETING).await?;
        self.controller.load_users().await?;
        self.show_form().await?;

        loop {
            self.view.write(SHELL_PROMPT).await?;
            let Some(line) = self.view.read_line().await? else {
                break;
            };
            match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(e) => self.view.write_line(&e.to_string()).await?,
            }
        }
        info!("Shell closed");

        Ok(())
    }

    async fn show_form(&self) -> StdResult<()> {
        let snapshot = self.controller.snapshot().await;

        self.view.render_form(&snapshot.form).await
    }

    async fn execute(&self, command: ShellCommand) -> StdResult<()> {
        debug!("Executing shell command: {command}");
        match command {
            ShellCommand::Refresh => self.controller.load_users().await,
            ShellCommand::Edit(id) => self.controller.edit_user(id).await,
            ShellCommand::InputId(input) => {
                self.controller.input_id(&input).await?;
                self.show_form().await
            }
            ShellCommand::InputName(input) => {
                self.controller.input_name(&input).await?;
                self.show_form().await
            }
            ShellCommand::Submit => self.controller.submit().await,
            ShellCommand::Cancel => self.controller.reset_form().await,
            ShellCommand::Delete(id) => self.controller.delete_user(id).await,
            ShellCommand::ShowForm => self.show_form().await,
            ShellCommand::Status => match self.controller.snapshot().await.notice {
                Some(notice) => self.view.show_notice(&notice).await,
                None => self.view.write_line("No message").await,
            },
            ShellCommand::Help => self.view.write_line(SHELL_HELP).await,
            ShellCommand::Quit | ShellCommand::Nothing => Ok(()),
        }
    }
}
