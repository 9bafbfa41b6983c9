//! Command-line arguments.

use clap::{Parser, Subcommand};
use cortex_types::{Metadata, ParamStyle};

#[derive(Debug, Parser)]
#[command(name = "cortex-cli")]
#[command(about = "Store, query and manage memories on a Cortex memory service", long_about = None)]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "CORTEX_API_URL", default_value = cortex_client::DEFAULT_BASE_URL)]
    pub url: String,

    /// Sent as X-API-Key when set
    #[arg(long, env = "CORTEX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Default application id
    #[arg(long, env = "CORTEX_APP_ID", default_value = cortex_client::FALLBACK_APP_ID)]
    pub app_id: String,

    /// Default external user id
    #[arg(long, env = "CORTEX_USER_ID", default_value = cortex_client::FALLBACK_EXTERNAL_USER_ID)]
    pub user_id: String,

    /// Send appId/externalUserId as query parameters instead of in the body
    #[arg(long, global = true, default_value_t = false)]
    pub query_params: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn style(&self) -> ParamStyle {
        if self.query_params {
            ParamStyle::Query
        } else {
            ParamStyle::Body
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Liveness probe
    Health,
    /// Store a memory
    Store {
        content: String,
        /// JSON object, e.g. '{"source":"chat"}'
        #[arg(long, value_parser = parse_metadata)]
        metadata: Option<Metadata>,
        #[arg(long)]
        bundle_id: Option<i64>,
    },
    /// Semantic query
    Query {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        bundle_id: Option<i64>,
        /// Minimum similarity, 0..=1
        #[arg(long)]
        threshold: Option<f64>,
        /// Restrict to these memory ids (comma separated)
        #[arg(long, value_delimiter = ',')]
        seed_ids: Option<Vec<i64>>,
    },
    /// Delete a memory by id
    Delete { id: i64 },
    /// List stored memories
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Create a bundle
    BundleCreate { name: String },
    /// List bundles
    BundleList,
    /// Show one bundle
    BundleGet { id: i64 },
    /// Delete a bundle
    BundleDelete { id: i64 },
    /// Backfill missing embeddings on the service
    GenerateEmbeddings {
        #[arg(long)]
        batch_size: Option<u32>,
    },
    /// Global counters
    Stats,
    /// Usage analytics for the tenant
    Analytics {
        #[arg(long)]
        days: Option<u32>,
    },
}

fn parse_metadata(s: &str) -> Result<Metadata, String> {
    serde_json::from_str(s).map_err(|e| format!("metadata must be a JSON object: {}", e))
}
