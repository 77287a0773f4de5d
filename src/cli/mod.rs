//! Command-line host for the directory controller.

mod prompt;
mod render;
mod shell;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use chat_directory::config::{Config, BASE_URL_ENV};
use chat_directory::controller::{
    ActionOutcome, AssumeYes, Confirm, DirectoryController, REQUIRED_FIELDS,
};
use chat_directory::directory::{DraftPatch, Store};
use chat_directory::remote::{DirectoryApi, HttpDirectoryClient, UserDraft, UserId};

use prompt::StdinPrompt;
use render::{print_details, print_directory, print_messages, print_user};

#[derive(Parser)]
#[command(name = "chat-directory")]
#[command(about = "Manage a chat user directory backed by a REST service", version)]
#[command(after_help = "EXAMPLES:
    chat-directory list                       Show users with post counts
    chat-directory show 1                     Show one user's details and posts
    chat-directory create --name \"Ann\" --email ann@example.com --username ann
    chat-directory delete 3 --yes             Delete without asking
    chat-directory shell                      Interactive session")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the REST base URL (also settable via CHAT_DIRECTORY_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logs and the full error chain
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List users with their post counts
    List,
    /// Show details and posts for one user
    Show {
        /// User id
        id: u64,
    },
    /// Create a user
    Create(DraftArgs),
    /// Delete a user
    Delete {
        /// User id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Fetch one user straight from the server
    Get {
        /// User id
        id: u64,
    },
    /// Replace a user's fields on the server
    Update {
        /// User id
        id: u64,

        #[command(flatten)]
        draft: DraftArgs,
    },
    /// List posts, optionally filtered by author on the server
    Posts {
        /// Only posts by this user id
        #[arg(long)]
        user: Option<u64>,
    },
    /// Start an interactive session
    Shell,
}

#[derive(Args)]
pub struct DraftArgs {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Username
    #[arg(long, default_value = "")]
    pub username: String,
}

impl From<DraftArgs> for UserDraft {
    fn from(args: DraftArgs) -> Self {
        UserDraft {
            name: args.name,
            email: args.email,
            username: args.username,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.base_url)?;
    let client = HttpDirectoryClient::new(&config.api)
        .context("Failed to build HTTP client")?;
    let limit = config.directory.message_limit;

    match cli.command {
        Command::List => {
            let controller = mount(client, StdinPrompt, limit).await?;
            print_directory(&controller.view());
        }
        Command::Show { id } => {
            let controller = mount(client, StdinPrompt, limit).await?;
            if !controller.select_user(Some(UserId(id))) {
                bail!("User {id} not found");
            }
            if let Some(details) = controller.view().details {
                print_details(&details);
            }
        }
        Command::Create(args) => {
            let controller = mount(client, StdinPrompt, limit).await?;
            controller.toggle_form();
            controller.edit_draft(DraftPatch::from_draft(args.into()));
            ensure(controller.create_user().await, "Create")?;
            println!("Usuario creado.");
            print_directory(&controller.view());
        }
        Command::Delete { id, yes: true } => {
            delete(client, AssumeYes, limit, UserId(id)).await?;
        }
        Command::Delete { id, yes: false } => {
            delete(client, StdinPrompt, limit, UserId(id)).await?;
        }
        Command::Get { id } => {
            let user = client.get_user(UserId(id)).await?;
            print_user(&user);
        }
        Command::Update { id, draft } => {
            let user = client.update_user(UserId(id), &draft.into()).await?;
            print_user(&user);
        }
        Command::Posts { user } => {
            let messages = match user {
                Some(id) => client.list_messages_for_user(UserId(id)).await?,
                None => client.list_messages().await?,
            };
            print_messages(&messages);
        }
        Command::Shell => {
            let store = Store::new();
            let controller = DirectoryController::new(client, store, StdinPrompt)
                .with_message_limit(limit);
            controller.mount().await;
            shell::run(controller).await?;
        }
    }

    Ok(())
}

/// File (or defaults), then the environment, then `--base-url`.
fn load_config(path: Option<&Path>, base_url: Option<String>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env_override(std::env::var(BASE_URL_ENV).ok());
            config
        }
        None => Config::load()?,
    };
    config.apply_env_override(base_url);
    config.validate()?;
    Ok(config)
}

/// Build a one-shot session and load it, failing if the users could not be fetched.
async fn mount<A, C>(
    api: A,
    confirm: C,
    limit: usize,
) -> anyhow::Result<DirectoryController<A, C>>
where
    A: DirectoryApi,
    C: Confirm,
{
    let controller =
        DirectoryController::new(api, Store::new(), confirm).with_message_limit(limit);
    let outcome = controller.mount().await;
    ensure(outcome.users, "Refresh")?;
    Ok(controller)
}

async fn delete<A, C>(api: A, confirm: C, limit: usize, id: UserId) -> anyhow::Result<()>
where
    A: DirectoryApi,
    C: Confirm,
{
    let controller = mount(api, confirm, limit).await?;
    if !controller.store().read(|state| state.contains_user(id)) {
        bail!("User {id} not found");
    }
    match controller.delete_user(id).await {
        ActionOutcome::Declined => println!("Cancelado."),
        outcome => {
            ensure(outcome, "Delete")?;
            println!("Usuario eliminado.");
        }
    }
    Ok(())
}

fn ensure(outcome: ActionOutcome, action: &str) -> anyhow::Result<()> {
    match outcome {
        ActionOutcome::Completed | ActionOutcome::Declined => Ok(()),
        ActionOutcome::Failed(message) => bail!(message),
        ActionOutcome::Invalid => bail!(REQUIRED_FIELDS),
        ActionOutcome::AlreadyRunning => bail!("{action} already in progress"),
        ActionOutcome::Discarded => bail!("{action} abandoned"),
    }
}
