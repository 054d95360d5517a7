use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Url};
use std::error::Error;

#[derive(Parser)]
#[command(name = "cap-search-cli")]
#[command(about = "CAP alert search CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "CAP_SEARCH_ENDPOINT", default_value = "http://localhost:8080")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search alerts
    Alerts(SearchArgs),

    /// Search information blocks
    Infos(SearchArgs),

    /// Get an alert by id
    Get {
        #[arg(value_name = "ALERT_ID")]
        id: String,
    },

    /// Check server health
    Health,
}

#[derive(Args, Default)]
struct SearchArgs {
    #[arg(long)]
    status: Option<String>,

    #[arg(long)]
    message_type: Option<String>,

    #[arg(long)]
    scope: Option<String>,

    #[arg(short, long)]
    language: Option<String>,

    #[arg(long)]
    certainty: Option<String>,

    #[arg(short = 'S', long)]
    severity: Option<String>,

    #[arg(short, long)]
    urgency: Option<String>,

    #[arg(long)]
    headline: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(long)]
    instruction: Option<String>,

    /// Point inside an alert area, as "lat,lon"
    #[arg(short, long, allow_hyphen_values = true)]
    point: Option<String>,

    /// Text in an area description
    #[arg(long)]
    area_desc: Option<String>,

    /// Time bound such as "expires_gte=2024-01-01T00:00:00Z"
    #[arg(short, long = "time", value_name = "FIELD_OP=TIMESTAMP")]
    time: Vec<String>,

    #[arg(short, long)]
    from: Option<i64>,

    #[arg(short, long)]
    size: Option<i64>,

    /// Sort field; prefix with '-' for descending
    #[arg(long, allow_hyphen_values = true)]
    sort: Vec<String>,
}

impl SearchArgs {
    /// Query-string pairs understood by the search endpoints
    fn query_pairs(&self) -> Result<Vec<(String, String)>, Box<dyn Error>> {
        let mut pairs = Vec::new();

        let named = [
            ("status", &self.status),
            ("message_type", &self.message_type),
            ("scope", &self.scope),
            ("language", &self.language),
            ("certainty", &self.certainty),
            ("severity", &self.severity),
            ("urgency", &self.urgency),
            ("headline", &self.headline),
            ("description", &self.description),
            ("instruction", &self.instruction),
            ("point", &self.point),
            ("area_desc", &self.area_desc),
        ];
        for (name, value) in named {
            if let Some(value) = value {
                pairs.push((name.to_string(), value.clone()));
            }
        }

        for bound in &self.time {
            let (name, value) = bound
                .split_once('=')
                .ok_or_else(|| format!("Time bound '{}' must look like FIELD_OP=TIMESTAMP", bound))?;
            pairs.push((name.to_string(), value.to_string()));
        }

        if let Some(from) = self.from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        for sort in &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }

        Ok(pairs)
    }
}

async fn print_response(response: reqwest::Response) -> Result<(), Box<dyn Error>> {
    let status = response.status();
    let body: serde_json::Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    if !status.is_success() {
        return Err(format!("Request failed with status {}", status).into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let endpoint = cli.endpoint.trim_end_matches('/');

    match cli.command {
        Commands::Alerts(args) => {
            let response = client
                .get(format!("{}/v1/alerts", endpoint))
                .query(&args.query_pairs()?)
                .send()
                .await?;
            print_response(response).await?;
        }

        Commands::Infos(args) => {
            let response = client
                .get(format!("{}/v1/infos", endpoint))
                .query(&args.query_pairs()?)
                .send()
                .await?;
            print_response(response).await?;
        }

        Commands::Get { id } => {
            let mut url = Url::parse(endpoint)?;
            url.path_segments_mut()
                .map_err(|_| format!("Endpoint {} cannot be used as a base", endpoint))?
                .pop_if_empty()
                .extend(["v1", "alerts", id.as_str()]);

            let response = client.get(url).send().await?;
            print_response(response).await?;
        }

        Commands::Health => {
            let response = client.get(format!("{}/health", endpoint)).send().await?;
            print_response(response).await?;
        }
    }

    Ok(())
}
