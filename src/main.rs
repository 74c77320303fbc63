use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use leavedesk::config::get_config_path;
use leavedesk::desk::{LeaveDesk, Outcome, SearchOutcome};
use leavedesk::display::*;
use leavedesk::mcp::McpServer;
use leavedesk::types::*;

/// Employee lookup and leave desk with typo-tolerant name matching.
#[derive(Parser)]
#[command(
    name = "leavedesk",
    about = "Employee lookup and leave desk with typo-tolerant name matching"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a leavedesk project with a default config and empty roster
    Init {
        /// Project path (default: current directory)
        path: Option<String>,
    },
    /// Resolve a name to a single employee
    Resolve {
        /// Name to resolve, e.g. "Jon Smyth"
        query: String,
        /// Department, title, email or last name used to break ties
        #[arg(long)]
        hint: Option<String>,
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Search with a phrase such as "priya from hr"
    Search {
        /// Search phrase
        text: String,
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Show the leave balance of an employee
    Balance {
        /// Employee name
        name: String,
        /// Department, title, email or last name used to break ties
        #[arg(long)]
        hint: Option<String>,
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Show directory and ledger statistics
    Status {
        /// Project path (default: current directory)
        path: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Start the MCP server on stdio
    Serve {
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; stdout carries command output and the MCP channel.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leavedesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> leavedesk::errors::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let project_path = resolve_path(path);
            let desk = LeaveDesk::init(&project_path)?;
            let stats = desk.stats()?;
            println!(
                "Initialized leavedesk at {} ({} employees)",
                get_config_path(&project_path).display(),
                stats.employee_count
            );
        }
        Commands::Resolve {
            query,
            hint,
            path,
            json,
        } => {
            let desk = LeaveDesk::open(&resolve_path(path))?;
            let resolution = desk.resolve(&query, hint.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolution_json(&resolution))?);
            } else {
                let text = match resolution {
                    Resolution::Resolved { employee } => format_employee_card(&desk.view(employee)?),
                    Resolution::NotFound { query } => format_not_found(&query),
                    Resolution::Ambiguous {
                        candidates,
                        message,
                    } => {
                        let views = candidates
                            .into_iter()
                            .map(|e| desk.view(e))
                            .collect::<leavedesk::errors::Result<Vec<_>>>()?;
                        format_ambiguous(&message, &views)
                    }
                };
                println!("{}", text);
            }
        }
        Commands::Search { text, path } => {
            let desk = LeaveDesk::open(&resolve_path(path))?;
            let output = match desk.search(&text)? {
                SearchOutcome::Found(view) => format_employee_card(&view),
                SearchOutcome::Multiple(views) => format_search_matches(&text, &views, false),
                SearchOutcome::Potential(views) => format_search_matches(&text, &views, true),
                SearchOutcome::NotFound => format!("No employees found matching '{}'", text),
            };
            println!("{}", output);
        }
        Commands::Balance { name, hint, path } => {
            let desk = LeaveDesk::open(&resolve_path(path))?;
            let output = match desk.leave_balance(&name, hint.as_deref())? {
                Outcome::Done(report) => format_balance(&report.view, report.balance),
                Outcome::NotFound { query } => format_not_found(&query),
                Outcome::Ambiguous {
                    message,
                    candidates,
                } => format_ambiguous(&message, &candidates),
            };
            println!("{}", output);
        }
        Commands::Status { path, json } => {
            let desk = LeaveDesk::open(&resolve_path(path))?;
            let stats = desk.stats()?;
            let options = desk.options();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Leavedesk Status");
                println!("  Employees:    {} ({} active)", stats.employee_count, stats.active_count);
                println!("  Departments:  {}", stats.department_count);
                println!("  Balances:     {}", stats.balance_count);
                println!("  Applications: {}", stats.application_count);
                println!(
                    "  Matching:     threshold {}, fallback limit {}",
                    options.threshold, options.fallback_limit
                );
            }
        }
        Commands::Serve { path } => {
            let desk = LeaveDesk::open(&resolve_path(path))?;
            let server = McpServer::new(desk);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server.run())?;
        }
    }
    Ok(())
}

fn resolution_json(resolution: &Resolution) -> serde_json::Value {
    match resolution {
        Resolution::NotFound { query } => json!({
            "status": resolution.as_str(),
            "query": query,
        }),
        Resolution::Resolved { employee } => json!({
            "status": resolution.as_str(),
            "employee": employee,
        }),
        Resolution::Ambiguous {
            candidates,
            message,
        } => json!({
            "status": resolution.as_str(),
            "message": message,
            "employees": candidates,
        }),
    }
}

/// Resolves an optional path argument to a `PathBuf`.
///
/// Defaults to the current working directory if no path is provided.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
