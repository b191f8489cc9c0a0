use std::io::{Stdout, Write};

use anyhow::Context;
use log::debug;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin},
    sync::Mutex,
};

use crate::{Notice, StdResult, User, UserForm, UserView};

/// The line rendered in place of the table when there are no users.
pub const EMPTY_USERS_MESSAGE: &str = "No users found. Add a user to get started!";

/// Renders users and form as plain text and reads confirmations line by line.
pub struct TerminalView<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
    assume_yes: bool,
}

impl TerminalView<BufReader<Stdin>, Stdout> {
    /// Creates a new `TerminalView` bound to the standard input and output.
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            assume_yes,
        )
    }
}

impl<R, W> TerminalView<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Creates a new `TerminalView` instance.
    ///
    /// With `assume_yes`, confirmations are granted without reading the input.
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
            assume_yes,
        }
    }

    /// Reads one line without its line terminator, `None` at end of input.
    pub async fn read_line(&self) -> StdResult<Option<String>> {
        let mut input = self.input.lock().await;
        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .await
            .with_context(|| "Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Writes text as is and flushes it.
    pub async fn write(&self, text: &str) -> StdResult<()> {
        let mut output = self.output.lock().await;
        output
            .write_all(text.as_bytes())
            .with_context(|| "Failed to write output")?;
        output.flush().with_context(|| "Failed to flush output")
    }

    /// Writes text followed by a line terminator.
    pub async fn write_line(&self, text: &str) -> StdResult<()> {
        self.write(&format!("{text}\n")).await
    }

    /// Consumes the view, returning its output.
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

fn format_users(users: &[User]) -> String {
    if users.is_empty() {
        return format!("{EMPTY_USERS_MESSAGE}\n");
    }
    let id_width = users
        .iter()
        .map(|user| user.id().to_string().len())
        .max()
        .unwrap_or_default()
        .max("ID".len());
    let mut table = format!("{:<id_width$} | NAME\n", "ID");
    table.push_str(&format!("{}-+-{}\n", "-".repeat(id_width), "-".repeat(4)));
    for user in users {
        table.push_str(&format!("{:<id_width$} | {}\n", user.id(), user.name()));
    }

    table
}

fn format_form(form: &UserForm) -> String {
    let read_only = if form.is_id_read_only() {
        " (read-only)"
    } else {
        ""
    };
    let mut rendering = format!(
        "== {} ==\nid:   {}{read_only}\nname: {}\n[submit] {}\n",
        form.title(),
        form.id_input(),
        form.name_input(),
        form.submit_label()
    );
    if form.is_cancel_visible() {
        rendering.push_str("[cancel] Cancel\n");
    }

    rendering
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait::async_trait]
impl<R, W> UserView for TerminalView<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn render_users(&self, users: &[User]) -> StdResult<()> {
        self.write(&format_users(users)).await
    }

    async fn render_form(&self, form: &UserForm) -> StdResult<()> {
        self.write(&format_form(form)).await
    }

    async fn show_notice(&self, notice: &Notice) -> StdResult<()> {
        self.write_line(&notice.to_string()).await
    }

    async fn confirm(&self, prompt: &str) -> StdResult<bool> {
        if self.assume_yes {
            debug!("Confirmation assumed: {prompt}");
            return Ok(true);
        }
        self.write(&format!("{prompt} [y/N] ")).await?;

        Ok(self
            .read_line()
            .await?
            .is_some_and(|answer| is_affirmative(&answer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_view(input: &'static [u8], assume_yes: bool) -> TerminalView<&'static [u8], Vec<u8>> {
        TerminalView::new(input, Vec::new(), assume_yes)
    }

    fn output_of(view: TerminalView<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8(view.into_output()).unwrap()
    }

    #[tokio::test]
    async fn render_users_as_table() {
        let view = build_view(b"", false);

        view.render_users(&[User::new(1, "Ada"), User::new(1234, "Grace")])
            .await
            .unwrap();

        assert_eq!(
            "ID   | NAME\n-----+-----\n1    | Ada\n1234 | Grace\n",
            output_of(view)
        );
    }

    #[tokio::test]
    async fn render_empty_users() {
        let view = build_view(b"", false);

        view.render_users(&[]).await.unwrap();

        assert_eq!(format!("{EMPTY_USERS_MESSAGE}\n"), output_of(view));
    }

    #[tokio::test]
    async fn render_form_in_edit_mode() {
        let view = build_view(b"", false);
        let mut form = UserForm::default();
        form.edit(&User::new(3, "Ada"));

        view.render_form(&form).await.unwrap();

        assert_eq!(
            "== Update User ==\nid:   3 (read-only)\nname: Ada\n[submit] Update User\n[cancel] Cancel\n",
            output_of(view)
        );
    }

    #[tokio::test]
    async fn show_notice_prefixes_kind() {
        let view = build_view(b"", false);

        view.show_notice(&Notice::error("Error deleting user"))
            .await
            .unwrap();

        assert_eq!("[error] Error deleting user\n", output_of(view));
    }

    #[tokio::test]
    async fn confirm_accepts_yes() {
        let view = build_view(b"YES\n", false);

        let confirmed = view.confirm("Delete?").await.unwrap();

        assert!(confirmed);
        assert_eq!("Delete? [y/N] ", output_of(view));
    }

    #[tokio::test]
    async fn confirm_declines_other_answers_and_end_of_input() {
        let view = build_view(b"nope\n", false);
        assert!(!view.confirm("Delete?").await.unwrap());
        assert!(!view.confirm("Delete?").await.unwrap());
    }

    #[tokio::test]
    async fn confirm_is_assumed_without_reading() {
        let view = build_view(b"n\n", true);

        assert!(view.confirm("Delete?").await.unwrap());
        assert_eq!(Some("n".to_string()), view.read_line().await.unwrap());
    }

    #[tokio::test]
    async fn read_line_strips_line_terminators() {
        let view = build_view(b"list\r\nquit\n", false);

        assert_eq!(Some("list".to_string()), view.read_line().await.unwrap());
        assert_eq!(Some("quit".to_string()), view.read_line().await.unwrap());
        assert_eq!(None, view.read_line().await.unwrap());
    }
}
