use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use crawlctl::{Credential, SessionClient};
use serde_json::Value;
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crawlctl", version, about = "Manage crawl workflows, crawls and uploads")]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    /// Organization name to operate within. Defaults to your first organization.
    #[arg(long, env = "CRAWLCTL_ORG", default_value = "", global = true)]
    org: String,

    /// Log requests as they're made.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SessionArgs {
    /// Base URL of the crawling service, e.g. https://app.example.com
    #[arg(long, env = "CRAWLCTL_URL", global = true)]
    url: Option<String>,

    #[arg(long, env = "CRAWLCTL_USERNAME", global = true)]
    username: Option<String>,

    #[arg(long, env = "CRAWLCTL_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// A pre-issued authorization value (e.g. "Bearer eyJ..."), used instead of logging in.
    #[arg(long, env = "CRAWLCTL_AUTH", global = true, hide_env_values = true)]
    auth: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the organizations you belong to.
    Orgs,
    /// Manage crawl workflows.
    #[command(subcommand)]
    Workflows(WorkflowCommand),
    /// Inspect and stop crawls.
    #[command(subcommand)]
    Crawls(CrawlCommand),
    /// Upload a file, streaming it from disk.
    Upload {
        path: PathBuf,
        /// Name to store the upload under. Defaults to the file name.
        #[arg(long)]
        name: Option<String>,
    },
    /// End the current session.
    Logout,
}

#[derive(Subcommand, Debug)]
enum WorkflowCommand {
    List,
    Get { id: String },
    /// Create a workflow from a JSON file ("-" reads standard input).
    Create { config: PathBuf },
    /// Update a workflow from a JSON file ("-" reads standard input).
    Update { id: String, config: PathBuf },
    Delete { id: String },
    /// Start a crawl of the given workflow.
    Run { id: String },
}

#[derive(Subcommand, Debug)]
enum CrawlCommand {
    List,
    Get { id: String },
    /// Gracefully stop a running crawl.
    Stop { id: String },
}

impl SessionArgs {
    /// Either wraps the given authorization value, or logs in with a username and password.
    async fn connect(&self) -> Result<SessionClient> {
        let Some(url) = &self.url else {
            bail!("a service URL is required (--url or CRAWLCTL_URL)");
        };

        if let Some(auth) = &self.auth {
            return Ok(SessionClient::new(url, Credential::from_header_value(auth.clone())));
        }

        let (Some(username), Some(password)) = (&self.username, &self.password) else {
            bail!("a username and password are required to log in");
        };
        SessionClient::login(url, username, password)
            .await
            .context("unable to log in")
    }
}

/// Reads a JSON payload from the given path, or standard input for `-`.
fn read_payload(path: &Path) -> Result<Value> {
    read_payload_from(path, io::stdin().lock())
}

fn read_payload_from(path: &Path, stdin: impl Read) -> Result<Value> {
    if path.as_os_str() == "-" {
        return serde_json::from_reader(stdin).context("unable to parse JSON from stdin");
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("unable to parse JSON in {}", path.display()))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the result of an operation that may have declined to run.
fn print_optional(value: Option<Value>) -> Result<()> {
    match value {
        Some(value) => print_json(&value),
        None => bail!("nothing was sent"),
    }
}

/// Resolves the organization to operate within, by name or to the first membership.
async fn organization(client: &SessionClient, name: &str) -> Result<String> {
    match client.resolve_organization(name).await? {
        Some(org) => Ok(org),
        None => bail!("you are not a member of any organization"),
    }
}

async fn run_workflow_command(client: &SessionClient, org: &str, command: WorkflowCommand) -> Result<()> {
    match command {
        WorkflowCommand::List => print_json(&client.list_workflows(org).await?),
        WorkflowCommand::Get { id } => print_optional(client.get_workflow(org, &id).await?),
        WorkflowCommand::Create { config } => {
            let config = read_payload(&config)?;
            print_optional(client.create_workflow(org, Some(config)).await?)
        }
        WorkflowCommand::Update { id, config } => {
            let config = read_payload(&config)?;
            print_optional(client.update_workflow(org, &id, Some(config)).await?)
        }
        WorkflowCommand::Delete { id } => print_optional(client.delete_workflow(org, &id).await?),
        WorkflowCommand::Run { id } => print_optional(client.run_workflow(org, &id).await?),
    }
}

async fn run_crawl_command(client: &SessionClient, org: &str, command: CrawlCommand) -> Result<()> {
    match command {
        CrawlCommand::List => print_json(&client.list_crawls(org).await?),
        CrawlCommand::Get { id } => print_optional(client.get_crawl(org, &id).await?),
        CrawlCommand::Stop { id } => print_optional(client.stop_crawl(org, &id).await?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "crawlctl=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let client = cli.session.connect().await?;

    match cli.command {
        // Neither of these need an organization.
        Command::Logout => print_json(&client.logout().await?),
        Command::Orgs => print_json(&serde_json::to_value(client.list_organizations().await?)?),
        Command::Workflows(command) => {
            let org = organization(&client, &cli.org).await?;
            run_workflow_command(&client, &org, command).await
        }
        Command::Crawls(command) => {
            let org = organization(&client, &cli.org).await?;
            run_crawl_command(&client, &org, command).await
        }
        Command::Upload { path, name } => {
            let org = organization(&client, &cli.org).await?;
            let response = client
                .upload_file(&org, &path, name.as_deref())
                .await
                .with_context(|| format!("unable to upload {}", path.display()))?;
            print_json(&response)
        }
    }
}
