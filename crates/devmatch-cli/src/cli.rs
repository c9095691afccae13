//! Argument parsing and command dispatch.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use url::Url;

use devmatch_core::{Gender, PageCursor};

use crate::commands::{auth, feed, profile};
use crate::context::{AppContext, CliResult};
use crate::output::OutputFormat;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3500";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Parser)]
#[command(name = "devmatch", about = "Command-line client for a devmatch feed server")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "DEVMATCH_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    api_url: Url,
    #[arg(long, global = true, env = "DEVMATCH_EMAIL")]
    email: Option<String>,
    #[arg(long, global = true, env = "DEVMATCH_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    #[arg(
        long,
        global = true,
        env = "DEVMATCH_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify credentials and print the authenticated profile.
    Login,
    /// Register a new account.
    Signup(SignupArgs),
    /// Show or update the authenticated profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Fetch and list one feed page.
    Feed(FeedArgs),
    /// Interactively accept or reject candidates until the feed runs dry.
    Swipe(FeedArgs),
}

#[derive(Subcommand)]
pub(crate) enum ProfileCommand {
    Show,
    Update(ProfileUpdateArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
            GenderArg::Other => Self::Other,
        }
    }
}

#[derive(Args)]
pub(crate) struct SignupArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long, value_enum)]
    pub(crate) gender: GenderArg,
    /// Date of birth as YYYY-MM-DD.
    #[arg(long)]
    pub(crate) dob: NaiveDate,
    /// Skill tag; repeat the flag for more than one.
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
}

#[derive(Args)]
pub(crate) struct ProfileUpdateArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long, value_enum)]
    pub(crate) gender: GenderArg,
    /// Date of birth as YYYY-MM-DD.
    #[arg(long)]
    pub(crate) dob: NaiveDate,
    /// Skill tag; repeat the flag for more than one.
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
    /// Image file to upload as the profile photo.
    #[arg(long)]
    pub(crate) photo: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct FeedArgs {
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    #[arg(long, default_value_t = PageCursor::DEFAULT_LIMIT)]
    pub(crate) limit: u32,
}

impl FeedArgs {
    pub(crate) fn cursor(&self) -> PageCursor {
        PageCursor::new(self.page, self.limit)
    }
}

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let ctx = AppContext {
        api_url: cli.api_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
        email: cli.email.clone(),
        password: cli.password.clone(),
        output: cli.output,
    };

    match dispatch(cli.command, &ctx).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(command: Command, ctx: &AppContext) -> CliResult<()> {
    match command {
        Command::Login => auth::handle_login(ctx).await,
        Command::Signup(args) => auth::handle_signup(ctx, args).await,
        Command::Profile(profile_command) => match profile_command {
            ProfileCommand::Show => profile::handle_show(ctx).await,
            ProfileCommand::Update(args) => profile::handle_update(ctx, args).await,
        },
        Command::Feed(args) => feed::handle_feed(ctx, &args).await,
        Command::Swipe(args) => feed::handle_swipe(ctx, &args).await,
    }
}

/// Parse the API URL provided to the CLI.
fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}
