use analytics::StudentQuery;
use api_client::PortalClient;
use clap::{Parser, Subcommand};
use configuration::settings::Config;
use configuration::StoreBackend;
use core_types::{SortKey, SortOrder};
use prompt::StdinPrompter;
use std::process::ExitCode;
use uuid::Uuid;
use views::add_student::{self, AddStudentForm};
use views::{home, login, view_students};

mod charts;
mod notify;
mod prompt;
mod views;

/// The main entry point for the student portal.
#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; settings fall back to config.toml and defaults.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match configuration::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✖ Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = match configuration::init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("✖ {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            notify::failure(&e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Keeps track of students: an API service plus a console to manage the records.
/// Run without a command to see the landing screen.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the student records API service.
    Serve(ServeArgs),
    /// Sign in (no credentials are checked), then add a student.
    Login(LoginArgs),
    /// Add a student. Missing fields are asked for.
    Add(AddArgs),
    /// Show statistics, charts and the student table.
    List(ListArgs),
    /// Replace all fields of a student, prompting with the current values.
    Update(UpdateArgs),
    /// Delete a student after confirmation.
    Delete(DeleteArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,

    /// Record store, overriding `database.backend`.
    #[arg(long, value_enum)]
    backend: Option<StoreBackend>,
}

#[derive(Parser)]
struct LoginArgs {
    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    password: Option<String>,
}

#[derive(Parser)]
struct AddArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    roll_no: Option<String>,

    /// Attendance percentage.
    #[arg(long)]
    attendance: Option<f64>,

    #[arg(long)]
    marks: Option<f64>,
}

#[derive(Parser)]
struct ListArgs {
    /// Case-insensitive filter on name or roll number.
    #[arg(long, default_value = "")]
    search: String,

    /// Column to sort by: name, roll-no, attendance or marks.
    #[arg(long, default_value = "name")]
    sort_by: SortKey,

    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,
}

impl ListArgs {
    fn query(&self) -> StudentQuery {
        let order = if self.desc { SortOrder::Desc } else { SortOrder::Asc };
        StudentQuery::new(self.search.clone(), self.sort_by, order)
    }
}

#[derive(Parser)]
struct UpdateArgs {
    /// Id of the student to update.
    id: Uuid,
}

#[derive(Parser)]
struct DeleteArgs {
    /// Id of the student to delete.
    id: Uuid,

    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

// ==============================================================================
// Command Dispatch
// ==============================================================================

async fn run(command: Option<Commands>, config: Config) -> anyhow::Result<()> {
    let api = PortalClient::from_config(&config.client);
    let mut prompter = StdinPrompter::new();

    let Some(command) = command else {
        return home::home(&api, &mut prompter).await;
    };

    match command {
        Commands::Serve(args) => serve(args, config).await,
        Commands::Login(args) => login::login(&api, &mut prompter, args.username, args.password).await,
        Commands::Add(args) => {
            let form = AddStudentForm {
                name: args.name,
                roll_no: args.roll_no,
                attendance: args.attendance,
                marks: args.marks,
            };
            add_student::submit(&api, &mut prompter, form).await
        }
        Commands::List(args) => view_students::show(&api, &args.query()).await,
        Commands::Update(args) => view_students::update(&api, &mut prompter, args.id, &StudentQuery::default()).await,
        Commands::Delete(args) => {
            view_students::delete(&api, &mut prompter, args.id, args.yes, &StudentQuery::default()).await
        }
    }
}

/// Applies the command-line overrides and runs the API service until it stops.
async fn serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(backend) = args.backend {
        config.database.backend = backend;
    }

    let store = database::open_store(&config.database).await?;
    web_server::run_server(config.server.socket_addr()?, store).await
}
