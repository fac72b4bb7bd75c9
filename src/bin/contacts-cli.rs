use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("response is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "contacts-cli")]
#[command(about = "Command line client for the Contact List API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every contact
    List,
    /// Show one contact
    Get { id: u64 },
    /// Create a contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Replace a contact's name, email and phone
    Update {
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Delete a contact
    Delete { id: u64 },
    /// Show aggregate statistics
    Summary,
    /// Search contacts by part of the name
    Search { name: String },
    /// Count contacts per email domain
    Providers,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let request = |method: Method, path: &str| client.request(method, format!("{}{}", base, path));

    let builder = match cli.command {
        Commands::List => request(Method::GET, "/contacts"),
        Commands::Get { id } => request(Method::GET, &format!("/contacts/{}", id)),
        Commands::Add { name, email, phone } => request(Method::POST, "/contacts")
            .json(&json!({ "name": name, "email": email, "phone": phone })),
        Commands::Update { id, name, email, phone } => {
            request(Method::PUT, &format!("/contacts/{}", id))
                .json(&json!({ "name": name, "email": email, "phone": phone }))
        }
        Commands::Delete { id } => request(Method::DELETE, &format!("/contacts/{}", id)),
        Commands::Summary => request(Method::GET, "/contacts/summary"),
        Commands::Search { name } => {
            request(Method::GET, "/contacts/search").query(&[("name", name)])
        }
        Commands::Providers => request(Method::GET, "/contacts/email-providers"),
    };

    send(builder).await
}

async fn send(builder: RequestBuilder) -> Result<String, CliError> {
    let res = builder.send().await?;
    let status = res.status();
    let body = res.text().await?;
    render(status, &body)
}

/// Pretty JSON for a 2xx response, the status line for an empty one, and an
/// error carrying the API's `error` message otherwise.
fn render(status: StatusCode, body: &str) -> Result<String, CliError> {
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or_else(|| body.trim().to_owned());
        return Err(CliError::Status { status, message });
    }

    if body.trim().is_empty() {
        return Ok(status.to_string());
    }
    let json: Value = serde_json::from_str(body)?;
    Ok(serde_json::to_string_pretty(&json)?)
}
