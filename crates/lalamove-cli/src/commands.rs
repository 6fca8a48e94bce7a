/*
[INPUT]:  Parsed subcommands and a loaded CLI configuration
[OUTPUT]: Text for stdout (pretty JSON or header lines)
[POS]:    Command layer - maps subcommands onto client calls
[UPDATE]: When adding subcommands or changing output format
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use lalamove_adapter::{
    HttpMethod,
    Item,
    LalamoveClient,
    QuotationPayload,
    SignatureGenerator,
    SignedHeaders,
    Stop,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::config::CliConfig;

const REDACTED: &str = "<redacted>";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the signed headers for a request without sending it
    Headers {
        #[arg(long, value_name = "METHOD")]
        method: String,
        #[arg(long, value_name = "PATH")]
        path: String,
        #[arg(long, value_name = "JSON", default_value = "")]
        body: String,
        /// Sign at this Unix time in milliseconds instead of now
        #[arg(long, value_name = "MILLIS")]
        timestamp: Option<u64>,
        /// Print the Authorization signature instead of redacting it
        #[arg(long = "show-token")]
        show_token: bool,
    },
    /// List cities and their services
    Cities {
        #[arg(long, value_name = "MARKET")]
        market: Option<String>,
    },
    /// Show one city by locode, e.g. HK_HKG
    City {
        id: String,
        #[arg(long, value_name = "MARKET")]
        market: Option<String>,
    },
    /// Find the smallest service that can carry a load
    ServiceType {
        #[arg(long, value_name = "VALUE")]
        load: Decimal,
        #[arg(long, value_name = "ID")]
        city: Option<String>,
        #[arg(long, value_name = "MARKET")]
        market: Option<String>,
    },
    /// Request a quotation from a YAML or JSON payload file
    Quote {
        #[arg(long, value_name = "PATH")]
        payload: PathBuf,
    },
    /// Inspect or cancel orders
    #[command(subcommand)]
    Order(OrderCommand),
    /// Register the webhook URL
    Webhook { url: String },
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    Get { id: String },
    Cancel { id: String },
}

/// Quotation fields as written in a payload file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFile {
    pub service_type: String,
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub special_requests: Option<Vec<String>>,
    #[serde(default)]
    pub is_route_optimized: Option<bool>,
    /// Any RFC 3339 time; sent as UTC
    #[serde(default)]
    pub schedule_at: Option<String>,
    #[serde(default)]
    pub item: Option<Item>,
}

impl QuoteFile {
    /// JSON is read through the YAML parser
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read payload {}", path.display()))?;
        serde_yaml::from_str(&content).context("parse payload")
    }

    pub fn into_payload(self) -> Result<QuotationPayload> {
        let mut builder = QuotationPayload::builder()
            .service_type(self.service_type)
            .stops(self.stops);
        if let Some(language) = self.language {
            builder = builder.language(language);
        }
        if let Some(special_requests) = self.special_requests {
            builder = builder.special_requests(special_requests);
        }
        if let Some(optimized) = self.is_route_optimized {
            builder = builder.is_route_optimized(optimized);
        }
        if let Some(item) = self.item {
            builder = builder.item(item);
        }
        if let Some(at) = self.schedule_at.as_deref() {
            builder = builder.schedule_at_str(at)?;
        }
        Ok(builder.build()?)
    }
}

pub async fn run(command: Command, config: &CliConfig) -> Result<String> {
    match command {
        Command::Headers {
            method,
            path,
            body,
            timestamp,
            show_token,
        } => {
            let signer = SignatureGenerator::new(config.credentials());
            let method: HttpMethod = method.parse()?;
            let request_id = config.request_id.as_deref();
            let headers = match timestamp {
                Some(ts) => signer.headers_at(method, &path, &config.market, &body, request_id, ts)?,
                None => signer.get_headers(method, &path, &config.market, &body, request_id)?,
            };
            Ok(render_headers(&headers, show_token))
        }
        Command::Cities { market } => {
            let client = config.build_client()?;
            let cities = client.get_cities(market.as_deref()).await?;
            info!(count = cities.len(), "cities loaded");
            to_pretty(&cities)
        }
        Command::City { id, market } => {
            let client = config.build_client()?;
            to_pretty(&client.get_city(&id, market.as_deref()).await?)
        }
        Command::ServiceType { load, city, market } => {
            let client = config.build_client()?;
            let service = client
                .service_type_by_load(load, city.as_deref(), market.as_deref())
                .await?;
            to_pretty(&json!({ "serviceType": service }))
        }
        Command::Quote { payload } => {
            let payload = QuoteFile::from_file(&payload)?.into_payload()?;
            let client = config.build_client()?;
            to_pretty(&client.create_quotation(&payload).await?)
        }
        Command::Order(order) => run_order(order, &config.build_client()?).await,
        Command::Webhook { url } => {
            let client = config.build_client()?;
            to_pretty(&client.set_webhook(&url).await?)
        }
    }
}

async fn run_order(command: OrderCommand, client: &LalamoveClient) -> Result<String> {
    match command {
        OrderCommand::Get { id } => to_pretty(&client.get_order(&id).await?),
        OrderCommand::Cancel { id } => {
            client.cancel_order(&id).await?;
            info!(order_id = %id, "order cancelled");
            to_pretty(&json!({ "orderId": id, "cancelled": true }))
        }
    }
}

/// One `Name: value` line per header; the signature part of the token is hidden unless asked
pub fn render_headers(headers: &SignedHeaders, show_token: bool) -> String {
    headers
        .lines()
        .iter()
        .map(|line| {
            if show_token || !line.name.eq_ignore_ascii_case("Authorization") {
                return line.to_string();
            }
            let redacted = match line.value.rsplit_once(':') {
                Some((prefix, _signature)) => format!("{prefix}:{REDACTED}"),
                None => REDACTED.to_string(),
            };
            format!("{}: {redacted}", line.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("render output")
}
