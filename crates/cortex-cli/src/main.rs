//! cortex-cli: the Cortex memory API from the command line.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use cortex_client::{ClientConfig, CortexClient, CortexError, TenantScope};
use cortex_types::{
    CreateBundleRequest, ListMemoriesRequest, QueryMemoryRequest, StoreMemoryRequest,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::new(cli.url.clone()).with_tenant(&cli.app_id, &cli.user_id);
    if let Some(ref key) = cli.api_key {
        config = config.with_api_key(key);
    }
    let client = CortexClient::new(config);
    tracing::debug!(url = %cli.url, app_id = %cli.app_id, "cortex-cli starting");

    match run(&client, &cli).await {
        Ok(()) => Ok(()),
        Err(Failure::Api(e)) => {
            if let Some(line) = status_line(&e) {
                eprintln!("{}", line);
            }
            Err(e.into())
        }
        Err(Failure::Output(e)) => Err(e.into()),
    }
}

fn status_line(e: &CortexError) -> Option<String> {
    e.status_code().map(|status| format!("cortex-cli: HTTP {}", status))
}

enum Failure {
    Api(CortexError),
    Output(serde_json::Error),
}

impl From<CortexError> for Failure {
    fn from(e: CortexError) -> Self {
        Failure::Api(e)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(e: serde_json::Error) -> Self {
        Failure::Output(e)
    }
}

fn print<T: Serialize>(value: &T) -> Result<(), Failure> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(client: &CortexClient, cli: &Cli) -> Result<(), Failure> {
    let style = cli.style();
    let tenant = TenantScope::default();
    match &cli.command {
        Command::Health => print(&client.health().await?),
        Command::Store {
            content,
            metadata,
            bundle_id,
        } => {
            let req = StoreMemoryRequest {
                content: content.clone(),
                metadata: metadata.clone(),
                bundle_id: *bundle_id,
                tenant,
            };
            print(&client.store_memory(&req, style).await?)
        }
        Command::Query {
            query,
            limit,
            bundle_id,
            threshold,
            seed_ids,
        } => {
            let req = QueryMemoryRequest {
                query: query.clone(),
                limit: *limit,
                bundle_id: *bundle_id,
                threshold: *threshold,
                seed_ids: seed_ids.clone(),
                tenant,
            };
            print(&client.query_memory(&req, style).await?)
        }
        Command::Delete { id } => print(&client.delete_memory(*id, &tenant).await?),
        Command::List { limit, offset } => {
            let req = ListMemoriesRequest {
                limit: *limit,
                offset: *offset,
                tenant,
            };
            print(&client.list_memories(&req).await?)
        }
        Command::BundleCreate { name } => {
            let req = CreateBundleRequest::new(name.clone());
            print(&client.create_bundle(&req, style).await?)
        }
        Command::BundleList => print(&client.list_bundles(&tenant).await?),
        Command::BundleGet { id } => print(&client.get_bundle(*id, &tenant).await?),
        Command::BundleDelete { id } => print(&client.delete_bundle(*id, &tenant).await?),
        Command::GenerateEmbeddings { batch_size } => {
            print(&client.generate_embeddings(*batch_size).await?)
        }
        Command::Stats => print(&client.stats().await?),
        Command::Analytics { days } => print(&client.analytics(&tenant, *days).await?),
    }
}
