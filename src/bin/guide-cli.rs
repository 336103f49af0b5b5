use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use url::Url;

#[derive(Parser)]
#[command(name = "guide-cli")]
#[command(about = "Command line client for the Request Guide service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Health,
    /// List every lesson and its routes
    Lessons,
    /// Show one lesson
    Lesson { slug: String },
    /// Fetch an item by integer id
    Item { id: String },
    /// Describe a model (alexnet, resnet, lenet)
    Model { name: String },
    /// List items through the query model
    Filter {
        #[arg(long)]
        limit: Option<String>,
        #[arg(long)]
        offset: Option<String>,
        #[arg(long)]
        order_by: Option<String>,
        /// May be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Send an item body and show the price with tax
    CreateItem {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tax: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let res = match cli.command {
        Commands::Health => client.get(endpoint(&base, &["health"])?).send().await?,
        Commands::Lessons => client.get(endpoint(&base, &["lessons"])?).send().await?,
        Commands::Lesson { slug } => {
            client
                .get(endpoint(&base, &["lessons", &slug])?)
                .send()
                .await?
        }
        Commands::Item { id } => {
            client
                .get(endpoint(&base, &["path-params", "items", &id])?)
                .send()
                .await?
        }
        Commands::Model { name } => {
            client
                .get(endpoint(&base, &["path-params", "models", &name])?)
                .send()
                .await?
        }
        Commands::Filter {
            limit,
            offset,
            order_by,
            tags,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            query.extend(limit.map(|v| ("limit", v)));
            query.extend(offset.map(|v| ("offset", v)));
            query.extend(order_by.map(|v| ("order_by", v)));
            query.extend(tags.into_iter().map(|v| ("tags", v)));
            client
                .get(endpoint(&base, &["query-models", "items"])?)
                .query(&query)
                .send()
                .await?
        }
        Commands::CreateItem {
            name,
            price,
            description,
            tax,
        } => {
            let body = json!({
                "name": name,
                "price": price,
                "description": description,
                "tax": tax,
            });
            client
                .post(endpoint(&base, &["request-body", "items", "update"])?)
                .json(&body)
                .send()
                .await?
        }
    };

    print_response(res).await
}

/// Appends percent-encoded path segments to the base URL.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("{} cannot be used as a base URL", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(ExitCode::SUCCESS)
}
