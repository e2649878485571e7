use crate::notify;
use crate::prompt::{Prompter, ask_required};
use crate::views::add_student::{self, AddStudentForm};
use api_client::StudentApi;

/// Accepts any non-empty username and password and moves on to the add form.
/// Nothing is checked against a user store.
pub async fn login(
    api: &dyn StudentApi,
    prompter: &mut dyn Prompter,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    println!("Student Portal Login");
    let Some(username) = given_or_asked(prompter, username, "Username")? else {
        notify::cancelled("Login cancelled.");
        return Ok(());
    };
    if given_or_asked(prompter, password, "Password")?.is_none() {
        notify::cancelled("Login cancelled.");
        return Ok(());
    }

    tracing::info!(%username, "Signed in without authentication.");
    add_student::submit(api, prompter, AddStudentForm::default()).await
}

fn given_or_asked(
    prompter: &mut dyn Prompter,
    value: Option<String>,
    label: &str,
) -> std::io::Result<Option<String>> {
    match value.filter(|v| !v.is_empty()) {
        Some(value) => Ok(Some(value)),
        None => ask_required(prompter, label),
    }
}
