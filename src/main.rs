use std::{sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use log::{debug, info};

use users_console::{
    DEFAULT_API_BASE_URL, FormController, GatewayRetrier, HttpUserGateway, OneShotOperation,
    OneShotRunner, StdResult, TerminalShell, TerminalView, UserFormController, UserGateway, UserId,
    UserView,
};

/// Command line arguments for the user management console
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Base URL of the user API (e.g., http://localhost:8080/api/v3)
    #[arg(short = 'u', long, env = "USERS_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Maximum number of attempts for read requests
    #[arg(short = 'r', long, default_value_t = 3)]
    max_retries: u32,

    /// Base delay of the exponential backoff between read attempts, in milliseconds
    #[arg(long, default_value_t = 200)]
    retry_base_delay_ms: u64,

    /// Answer yes to confirmation questions
    #[arg(short = 'y', long)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users
    List,

    /// Show a single user
    Show {
        /// The user id
        id: i32,
    },

    /// Add a user
    Add {
        /// The user name
        #[arg(short, long)]
        name: String,

        /// The user id, assigned by the backend when omitted
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Update the name of a user
    Update {
        /// The user id
        id: i32,

        /// The new user name
        #[arg(short, long)]
        name: String,
    },

    /// Delete a user
    Delete {
        /// The user id
        id: i32,
    },

    /// Start the interactive form shell (default)
    Shell,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    let args = Args::parse();
    debug!("Arguments: {args:?}");

    let http_gateway = HttpUserGateway::try_new(&args.api_base_url)?;
    let backend_label = http_gateway.base_url().to_string();
    info!("Using user API at {backend_label}");
    let gateway: Arc<dyn UserGateway> = Arc::new(GatewayRetrier::new(
        Arc::new(http_gateway),
        args.max_retries,
        Duration::from_millis(args.retry_base_delay_ms),
    ));
    let view = Arc::new(TerminalView::stdio(args.yes));
    let controller: Arc<dyn UserFormController> = Arc::new(FormController::new(
        gateway.clone(),
        view.clone(),
        &backend_label,
    ));

    let operation = match args.command.unwrap_or(Command::Shell) {
        Command::Shell => return TerminalShell::new(controller, view).run().await,
        Command::Show { id } => {
            let user = gateway.get_user(UserId(id)).await?;
            return view.render_users(&[user]).await;
        }
        Command::List => OneShotOperation::List,
        Command::Add { name, id } => OneShotOperation::Add { id, name },
        Command::Update { id, name } => OneShotOperation::Update {
            id: UserId(id),
            name,
        },
        Command::Delete { id } => OneShotOperation::Delete(UserId(id)),
    };

    OneShotRunner::new(controller).run(operation).await
}
