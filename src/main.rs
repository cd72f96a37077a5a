use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use smartsheet_tools::{
    api::Id,
    config::{Config, ALLOW_DELETE_VAR, API_KEY_VAR, DEFAULT_ENDPOINT, ENDPOINT_VAR, MAX_RETRIES_VAR},
    tools::ToolRegistry,
    Client,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// smartsheet - Smartsheet API from the command line
///
/// Every command prints the API response as pretty JSON on stdout.
/// Rate limited requests are retried with exponential backoff.
///
/// Examples:
///   smartsheet me                          # Show the current user
///   smartsheet sheet 4583173393803140      # Fetch a sheet
///   smartsheet call list_webhooks          # Invoke a tool
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API access token (also via SMARTSHEET_API_KEY)
    #[arg(long, env = "SMARTSHEET_API_KEY", hide_env_values = true, global = true)]
    token: Option<String>,

    /// API endpoint (also via SMARTSHEET_ENDPOINT)
    #[arg(long, env = "SMARTSHEET_ENDPOINT", value_name = "URL", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Expose tools that delete data (also via ALLOW_DELETE_TOOLS=true)
    #[arg(long, global = true)]
    allow_delete: bool,

    /// Retries for rate limited requests (also via SMARTSHEET_MAX_RETRIES)
    #[arg(long, env = "SMARTSHEET_MAX_RETRIES", value_name = "N", global = true)]
    max_retries: Option<usize>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the current user
    Me,
    /// List users, optionally filtered by email
    ListUsers {
        #[arg(long)]
        email: Option<String>,
    },
    /// List workspaces
    Workspaces,
    /// Show a workspace
    Workspace { id: Id },
    /// Create a workspace
    CreateWorkspace { name: String },
    /// Show a folder
    Folder { id: Id },
    /// Create a folder inside another folder
    CreateFolder { parent: Id, name: String },
    /// Fetch a sheet
    Sheet {
        id: Id,
        /// Comma-separated elements to include (e.g. "attachments,discussions")
        include: Option<String>,
    },
    /// Show the version of a sheet
    SheetVersion { id: Id },
    /// Show where a sheet lives
    SheetLocation { id: Id },
    /// Copy a sheet into a folder, or the home folder when omitted
    CopySheet {
        id: Id,
        name: String,
        folder: Option<Id>,
    },
    /// Fetch a row
    Row { sheet: Id, row: Id },
    /// Show the history of a cell
    CellHistory { sheet: Id, row: Id, column: Id },
    /// List the columns of a sheet
    Columns { sheet: Id },
    /// Show a column
    Column { sheet: Id, column: Id },
    /// List reports
    Reports,
    /// Fetch a report
    Report {
        id: Id,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// List the attachments of a sheet
    Attachments {
        sheet: Id,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show an attachment
    Attachment { sheet: Id, id: Id },
    /// List the discussions of a sheet
    Discussions { sheet: Id },
    /// Search everything
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search one sheet
    SearchSheet {
        sheet: Id,
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search folder names
    SearchFolders {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search workspace names
    SearchWorkspaces {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List the available tools
    Tools,
    /// Invoke a tool with JSON arguments
    Call {
        tool: String,
        /// Arguments object, e.g. '{"webhookId": 42}'
        args: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> smartsheet_tools::Result<Config> {
        Config::from_lookup(|key| match key {
            API_KEY_VAR => self.token.clone(),
            ENDPOINT_VAR => Some(self.endpoint.clone()),
            ALLOW_DELETE_VAR if self.allow_delete => Some("true".to_string()),
            ALLOW_DELETE_VAR => std::env::var(key).ok(),
            MAX_RETRIES_VAR => self.max_retries.map(|n| n.to_string()),
            _ => None,
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let client = Client::from_config(&config)?;

    match cli.command {
        Commands::Me => print_json(&client.users().current_user().await?),
        Commands::ListUsers { email } => print_json(&client.users().list(email.as_deref()).await?),
        Commands::Workspaces => print_json(&client.workspaces().list().await?),
        Commands::Workspace { id } => print_json(&client.workspaces().get(id).await?),
        Commands::CreateWorkspace { name } => print_json(&client.workspaces().create(&name).await?),
        Commands::Folder { id } => print_json(&client.folders().get(id).await?),
        Commands::CreateFolder { parent, name } => {
            print_json(&client.folders().create_subfolder(parent, &name).await?)
        }
        Commands::Sheet { id, include } => {
            print_json(&client.sheets().get(id, include.as_deref()).await?)
        }
        Commands::SheetVersion { id } => print_json(&client.sheets().version(id).await?),
        Commands::SheetLocation { id } => print_json(&client.sheets().location(id).await?),
        Commands::CopySheet { id, name, folder } => {
            print_json(&client.sheets().copy(id, &name, folder).await?)
        }
        Commands::Row { sheet, row } => print_json(&client.sheets().row(sheet, row).await?),
        Commands::CellHistory { sheet, row, column } => {
            print_json(&client.sheets().cell_history(sheet, row, column).await?)
        }
        Commands::Columns { sheet } => print_json(&client.columns().list(sheet, None).await?),
        Commands::Column { sheet, column } => {
            print_json(&client.columns().get(sheet, column, None).await?)
        }
        Commands::Reports => print_json(&client.reports().list(None, None, None).await?),
        Commands::Report { id, page_size, page } => {
            print_json(&client.reports().get(id, page_size, page, None).await?)
        }
        Commands::Attachments { sheet, page } => {
            print_json(&client.attachments().list_for_sheet(sheet, page, None).await?)
        }
        Commands::Attachment { sheet, id } => {
            print_json(&client.attachments().get(sheet, id).await?)
        }
        Commands::Discussions { sheet } => print_json(&client.sheets().discussions(sheet).await?),
        Commands::Search { query } => {
            print_json(&client.search().everything(&query.join(" ")).await?)
        }
        Commands::SearchSheet { sheet, query } => {
            print_json(&client.search().sheet(sheet, &query.join(" ")).await?)
        }
        Commands::SearchFolders { query } => {
            print_json(&client.search().folders(&query.join(" ")).await?)
        }
        Commands::SearchWorkspaces { query } => {
            print_json(&client.search().workspaces(&query.join(" ")).await?)
        }
        Commands::Tools => {
            let registry = ToolRegistry::new(client, config.allow_delete_tools);
            print_json(&registry.definitions().collect::<Vec<_>>())
        }
        Commands::Call { tool, args } => {
            let args = match args {
                Some(raw) => serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid JSON arguments for {}", tool))?,
                None => serde_json::Value::Null,
            };
            let registry = ToolRegistry::new(client, config.allow_delete_tools);
            let output = registry.call(&tool, args).await;
            if output.is_error {
                bail!(output.text);
            }
            println!("{}", output.text);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_sheet_parsing() {
        let cli = Cli::try_parse_from(["smartsheet", "sheet", "42", "attachments"]).unwrap();
        match cli.command {
            Commands::Sheet { id, include } => {
                assert_eq!(id, 42);
                assert_eq!(include.as_deref(), Some("attachments"));
            }
            _ => panic!("Expected Sheet command"),
        }
    }

    #[test]
    fn test_cli_copy_sheet_without_folder() {
        let cli = Cli::try_parse_from(["smartsheet", "copy-sheet", "1", "Copy of plan"]).unwrap();
        match cli.command {
            Commands::CopySheet { id, name, folder } => {
                assert_eq!(id, 1);
                assert_eq!(name, "Copy of plan");
                assert_eq!(folder, None);
            }
            _ => panic!("Expected CopySheet command"),
        }
    }

    #[test]
    fn test_cli_search_joins_words() {
        let cli = Cli::try_parse_from(["smartsheet", "search", "quarterly", "budget"]).unwrap();
        match cli.command {
            Commands::Search { query } => assert_eq!(query.join(" "), "quarterly budget"),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_requires_query() {
        assert!(Cli::try_parse_from(["smartsheet", "search"]).is_err());
    }

    #[test]
    fn test_cli_global_flags_build_config() {
        let cli = Cli::try_parse_from([
            "smartsheet",
            "call",
            "list_webhooks",
            "--token",
            "abc",
            "--endpoint",
            "https://api.smartsheet.eu/2.0",
            "--allow-delete",
            "--max-retries",
            "5",
        ])
        .unwrap();

        let config = cli.config().unwrap();
        assert_eq!(config.access_token, "abc");
        assert_eq!(config.endpoint, "https://api.smartsheet.eu/2.0");
        assert!(config.allow_delete_tools);
        assert_eq!(config.retry_policy.max_retries, 5);
    }

    #[test]
    fn test_cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["smartsheet", "workspace", "abc"]).is_err());
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["smartsheet"]).is_err());
    }
}
