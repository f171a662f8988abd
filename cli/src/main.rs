mod transport;

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use client::components::shop_card::{format_price, item_label};
use client::net::api::{fetch_health, fetch_info};
use client::net::error::ClientError;
use client::net::types::{Coordinates, Role, SearchResult};
use client::pages::dashboard::welcome_line;
use client::pages::login::{LOGIN_FAILED_MESSAGE, LOGIN_REJECTED_MESSAGE};
use client::state::search::{SearchFlow, SearchState};
use client::state::session::{Session, SessionStore};
use client::state::signup::{SignupFlow, SignupForm, SignupState, field};
use client::util::geo::FixedGeolocator;
use tracing_subscriber::EnvFilter;

use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client init failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Parser, Debug)]
#[command(name = "nearbuy", about = "NearBuy API command-line client")]
struct Cli {
    #[arg(long, env = "NEARBUY_API_URL", default_value = "http://localhost:8059/api/v1")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backend health and version.
    Status,
    /// Check credentials and print the signed-in identity.
    Login(LoginArgs),
    /// Search shops near a position.
    Search(SearchArgs),
    /// Register a new account.
    Signup(SignupCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "NEARBUY_PASSWORD")]
    password: String,
}

#[derive(Args, Debug)]
struct SearchArgs {
    query: String,
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
    /// Print results as a JSON array instead of one line per shop.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SignupCommand {
    #[command(subcommand)]
    role: SignupRole,
}

#[derive(Subcommand, Debug)]
enum SignupRole {
    User(AccountArgs),
    Vendor(VendorArgs),
}

#[derive(Args, Debug)]
struct AccountArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "NEARBUY_PASSWORD")]
    password: String,
}

#[derive(Args, Debug)]
struct VendorArgs {
    #[command(flatten)]
    account: AccountArgs,
    #[arg(long)]
    shop_name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    contact: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let api = ReqwestTransport::new(&cli.base_url)?;
    match cli.command {
        Command::Status => run_status(&api).await,
        Command::Login(args) => run_login(api, args).await,
        Command::Search(args) => run_search(api, args).await,
        Command::Signup(cmd) => run_signup(api, cmd).await,
    }
}

async fn run_status(api: &ReqwestTransport) -> Result<(), CliError> {
    let health = fetch_health(api).await?;
    let info = fetch_info(api).await?;
    println!("{} {} ({})", info.app, info.version, health.status);
    println!("server time: {}", health.timestamp);
    if !info.docs.is_empty() {
        println!("docs: {}", info.docs);
    }
    Ok(())
}

async fn run_login(api: ReqwestTransport, args: LoginArgs) -> Result<(), CliError> {
    let store = SessionStore::new(api, Rc::new(RefCell::new(Session { identity: None, loading: false })));
    match store.login(&args.email, &args.password).await {
        Ok(Some(outcome)) => {
            println!("{}", outcome.message);
            println!("{}", welcome_line(&outcome.identity));
            store.logout().await;
            Ok(())
        }
        Ok(None) => Err(CliError::Rejected(LOGIN_REJECTED_MESSAGE.to_owned())),
        Err(e) => {
            tracing::warn!(error = %e, "login request failed");
            Err(CliError::Rejected(LOGIN_FAILED_MESSAGE.to_owned()))
        }
    }
}

async fn run_search(api: ReqwestTransport, args: SearchArgs) -> Result<(), CliError> {
    let position = search_position(&args);
    let flow = SearchFlow::new(api, FixedGeolocator::new(position), Rc::new(RefCell::new(SearchState::default())));
    flow.locate().await;
    flow.search(&args.query).await;

    let state = flow.state().borrow().clone();
    if !state.message.is_empty() {
        eprintln!("{}", state.message);
    }
    if args.json {
        println!("{}", render_results_json(&state.results)?);
        return Ok(());
    }
    for result in &state.results {
        println!("{}", result_line(result));
    }
    Ok(())
}

async fn run_signup(api: ReqwestTransport, cmd: SignupCommand) -> Result<(), CliError> {
    let state = SignupState { form: signup_form(&cmd.role), ..SignupState::default() };
    let flow = SignupFlow::new(api, Rc::new(RefCell::new(state)));
    match flow.submit().await {
        Some(message) => {
            println!("{message}");
            Ok(())
        }
        None => Err(CliError::Rejected(flow.state().borrow().error.clone())),
    }
}

/// Position from `--lat`/`--lon`; both are required for a search to run.
fn search_position(args: &SearchArgs) -> Option<Coordinates> {
    Some(Coordinates { latitude: args.lat?, longitude: args.lon? })
}

fn signup_form(role: &SignupRole) -> SignupForm {
    let (account, vendor) = match role {
        SignupRole::User(account) => (account, None),
        SignupRole::Vendor(vendor) => (&vendor.account, Some(vendor)),
    };

    let mut form = SignupForm::default();
    form.set_field(field::FULL_NAME, account.full_name.as_str());
    form.set_field(field::EMAIL, account.email.as_str());
    form.set_field(field::PASSWORD, account.password.as_str());
    if let Some(vendor) = vendor {
        form.set_role(Role::Vendor);
        form.set_field(field::SHOP_NAME, vendor.shop_name.as_str());
        form.set_field(field::ADDRESS, vendor.address.as_str());
        form.set_field(field::CONTACT, vendor.contact.as_str());
    }
    form
}

fn result_line(result: &SearchResult) -> String {
    format!(
        "{} | {} | {} | {}",
        result.shop_name,
        result.address,
        item_label(result.item_name.as_deref()),
        format_price(result.price)
    )
}

fn render_results_json(results: &[SearchResult]) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
