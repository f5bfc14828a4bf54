use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::error::Error;
use url::Url;

#[derive(Parser)]
#[command(name = "bff-cli")]
#[command(about = "Command-line client for a running ikas BFF", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show proxy health and token cache status
    Health,
    /// Send a raw GraphQL document through the proxy
    Query {
        /// GraphQL document, e.g. "{ listCustomerAttribute { id, name } }"
        query: String,
        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
    /// List customers
    Customers {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },
    /// List orders of a customer
    Orders {
        customer_id: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Query { query, variables } => {
            let mut body = json!({ "query": query });
            if let Some(raw) = variables {
                let parsed: Value = serde_json::from_str(&raw)?;
                body["variables"] = parsed;
            }
            client
                .post(format!("{}/api/ikas", base))
                .json(&body)
                .send()
                .await?
        }
        Commands::Customers { page, limit, search, id } => {
            let mut params: Vec<(&str, String)> = Vec::new();
            push_opt(&mut params, "page", page);
            push_opt(&mut params, "limit", limit);
            push_opt(&mut params, "search", search);
            push_opt(&mut params, "id", id);
            client
                .get(format!("{}/api/customers", base))
                .query(&params)
                .send()
                .await?
        }
        Commands::Orders { customer_id, page, limit } => {
            let mut params: Vec<(&str, String)> = Vec::new();
            push_opt(&mut params, "page", page);
            push_opt(&mut params, "limit", limit);
            client
                .get(orders_url(base, &customer_id)?)
                .query(&params)
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn push_opt<T: ToString>(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(v) = value {
        params.push((key, v.to_string()));
    }
}

/// `{base}/api/orders/customer/{id}` with the id as one encoded segment.
fn orders_url(base: &str, customer_id: &str) -> Result<Url, Box<dyn Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| "proxy URL cannot carry a path")?
        .pop_if_empty()
        .extend(["api", "orders", "customer", customer_id]);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("{}", rendered);
        return Err(format!("proxy returned status {}", status).into());
    }

    println!("{}", rendered);
    Ok(())
}
