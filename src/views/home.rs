use crate::prompt::Prompter;
use crate::views::login;
use api_client::StudentApi;

/// The landing screen: what the portal does and which commands reach it.
pub fn banner() -> String {
    [
        "Student Portal",
        "Empowering Education Through Intelligent Management",
        "",
        "Manage student data, track attendance, analyze performance and see",
        "the results on one dashboard.",
        "",
        "  login    sign in, then add a student",
        "  add      add a student",
        "  list     statistics, charts and the student table",
        "  update   change a student's details",
        "  delete   remove a student",
        "  serve    run the API service",
        "",
    ]
    .join("\n")
}

/// Shows the banner and, if the operator wants to get started, the login form.
pub async fn home(api: &dyn StudentApi, prompter: &mut dyn Prompter) -> anyhow::Result<()> {
    println!("{}", banner());
    if prompter.confirm("Get started?")? {
        login::login(api, prompter, None, None).await?;
    }
    Ok(())
}
