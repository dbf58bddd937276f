mod file_storage;
mod transport;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use portal::config::{ApiConfig, COMPETITIONS_PATH, TEAM_APPLICATIONS_PATH, TEAMS_PATH};
use portal::net::api::{ApiError, fetch_list, fetch_user_profile};
use portal::net::auth::{AuthKind, authenticate};
use portal::net::types::{CompetitionItem, decode_items};
use portal::routes::{AppRoute, NavigationError, resolve};
use portal::state::command::{CommandState, TeamKind, create_team, submit_application};
use portal::state::session::Session;
use portal::util::validate::{LoginForm, RegistrationForm, validate_team_form};
use serde_json::{Value, json};

use crate::file_storage::FileStorage;
use crate::transport::ReqwestTransport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `portal login` first")]
    NotSignedIn,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Command-line client for the competition portal API")]
struct Cli {
    #[arg(long, env = "PORTAL_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, env = "PORTAL_STATE_FILE", default_value = ".portal-session.json")]
    state_file: PathBuf,

    #[arg(long, env = "PORTAL_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the credential.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PORTAL_PASSWORD")]
        password: String,
    },
    /// Create an account.
    Register(RegisterArgs),
    /// Forget the stored credential, role, and identity.
    Logout,
    /// Show the stored session.
    Status,
    /// Check whether a page path would open or redirect.
    Route { path: String },
    /// Fetch the signed-in user's profile.
    Profile,
    /// List competitions.
    Competitions,
    /// Create a team.
    CreateTeam(CreateTeamArgs),
    /// Apply a team to a competition.
    Apply {
        #[arg(long)]
        team: i64,
        #[arg(long)]
        competition: i64,
    },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "PORTAL_PASSWORD")]
    password: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    surname: String,
    #[arg(long, default_value = "")]
    patronymic: String,
    #[arg(long)]
    nickname: String,
    /// Role id (see `/api/roles/`).
    #[arg(long)]
    role: String,
    #[arg(long, help = "Birth date, YYYY-MM-DD")]
    birthday: String,
    /// Region id (see `/api/regions/`).
    #[arg(long)]
    region: String,
}

#[derive(Args, Debug)]
struct CreateTeamArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    competition: i64,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value_t = false)]
    private: bool,
}

struct CliContext {
    config: ApiConfig,
    transport: ReqwestTransport,
    session: RefCell<Session>,
}

impl CliContext {
    fn token(&self) -> Result<String, CliError> {
        self.session.borrow().credential().map(str::to_owned).ok_or(CliError::NotSignedIn)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let storage = FileStorage::open(&cli.state_file);
    tracing::debug!(path = %storage.path().display(), "session storage opened");
    let ctx = CliContext {
        config: ApiConfig::new(&cli.base_url),
        transport: ReqwestTransport::new(Duration::from_secs(cli.timeout_secs))?,
        session: RefCell::new(Session::restore(Arc::new(storage))),
    };

    match cli.command {
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            first_error(form.validate().into_values())?;
            run_auth(&ctx, AuthKind::Login, &form.payload()).await
        }
        Command::Register(args) => {
            let form = registration_form(args);
            first_error(form.validate().into_values())?;
            run_auth(&ctx, AuthKind::Register, &form.payload()).await
        }
        Command::Logout => {
            ctx.session.borrow_mut().clear();
            println!("signed out");
            Ok(())
        }
        Command::Status => {
            print_json(&session_summary(&ctx.session.borrow()))?;
            Ok(())
        }
        Command::Route { path } => {
            let authed = ctx.session.borrow().is_authenticated();
            let target = AppRoute::from_path(&path);
            let landed = resolve(target.clone(), authed)?;
            if landed == target {
                println!("{target}: open");
            } else {
                println!("{target}: redirected to {landed}");
            }
            Ok(())
        }
        Command::Profile => {
            let token = ctx.token()?;
            let profile = fetch_user_profile(&ctx.transport, &ctx.config, Some(&token)).await?;
            print_json(&profile)?;
            Ok(())
        }
        Command::Competitions => {
            let token = ctx.session.borrow().credential().map(str::to_owned);
            let items = fetch_list(&ctx.transport, &ctx.config.url(COMPETITIONS_PATH), token.as_deref()).await?;
            for c in decode_items::<CompetitionItem>(items) {
                let dates = c.date_range().unwrap_or_else(|| "-".to_owned());
                println!("{:>5}  {}  ({dates})  {}", c.id, c.name, c.status);
            }
            Ok(())
        }
        Command::CreateTeam(args) => {
            let kind = if args.private { TeamKind::Private } else { TeamKind::Public };
            first_error(validate_team_form(&args.name, kind.code(), &args.description))?;
            let form = json!({
                "competition": args.competition,
                "name": args.name.trim(),
                "description": args.description,
                "is_private": args.private,
            });
            run_command(&ctx, TEAMS_PATH, &form, true).await
        }
        Command::Apply { team, competition } => {
            let form = json!({ "team_id": team, "competition": competition });
            run_command(&ctx, TEAM_APPLICATIONS_PATH, &form, false).await
        }
    }
}

async fn run_auth(ctx: &CliContext, kind: AuthKind, form: &Value) -> Result<(), CliError> {
    let ok = authenticate(&ctx.session, &ctx.transport, &ctx.config, kind, form).await;
    let session = ctx.session.borrow();
    let message = session.last_notice().message.clone();
    if !ok {
        return Err(CliError::Rejected(message));
    }
    tracing::info!(role = ?session.role().map(|r| r.as_str()), "credential stored");
    println!("{message}");
    Ok(())
}

async fn run_command(ctx: &CliContext, path: &str, form: &Value, creates_team: bool) -> Result<(), CliError> {
    let token = ctx.token()?;
    let store = RefCell::new(CommandState::default());
    let url = ctx.config.url(path);
    let ok = if creates_team {
        create_team(&store, &ctx.transport, &url, form, Some(&token)).await
    } else {
        submit_application(&store, &ctx.transport, &url, form, Some(&token)).await
    };
    let state = store.into_inner();
    if !ok {
        let detail = state.last_error.map(|e| e.to_string()).unwrap_or_default();
        return Err(CliError::Rejected(format!("{} ({detail})", state.notice.message)));
    }
    println!("{}", state.notice.message);
    Ok(())
}

fn registration_form(args: RegisterArgs) -> RegistrationForm {
    RegistrationForm {
        email: args.email,
        password: args.password,
        name: args.name,
        firstname: args.surname,
        lastname: args.patronymic,
        nickname: args.nickname,
        status: args.role,
        dt: args.birthday,
        region: args.region,
    }
}

/// Fail with the first validation message, if any.
fn first_error<'a>(messages: impl IntoIterator<Item = &'a str>) -> Result<(), CliError> {
    match messages.into_iter().next() {
        Some(message) => Err(CliError::Invalid(message.to_owned())),
        None => Ok(()),
    }
}

fn session_summary(session: &Session) -> Value {
    json!({
        "authenticated": session.is_authenticated(),
        "role": session.role().map(|r| r.as_str().to_owned()),
        "identity": session.identity().cloned(),
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
