use clap::{Parser, Subcommand};
use serde_json::Value;

use esplugin::credentials::{resolve_cluster, Credentials};
use esplugin::elasticsearch::ElasticsearchHelper;
use esplugin::logging;
use esplugin::provider;
use esplugin::tool::{ElasticsearchRestTool, ToolParameters};

#[derive(Parser)]
#[command(name = "esplugin-admin")]
#[command(about = "Check and call the Elasticsearch clusters configured for the plugin")]
struct Cli {
    /// JSON array of {"cluster_name": "username:password"} objects
    #[arg(long, env("ESPLUGIN_AUTH_LIST"), default_value = "")]
    auth_list: String,
    /// JSON array of {"cluster_name": "http://host:9200"} objects
    #[arg(long, env("ESPLUGIN_CLUSTER_INFO"))]
    cluster_info: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the provider credential validation
    Validate,
    /// Print the health of every configured cluster
    Health,
    /// Issue one REST call against a cluster
    Request {
        /// Cluster name from cluster_info
        #[arg(long)]
        cluster: String,
        #[arg(long, default_value = "GET")]
        method: String,
        /// e.g. "/_cat/indices?format=json"
        #[arg(long)]
        endpoint: String,
        /// JSON request body
        #[arg(long)]
        body: Option<String>,
        /// Seconds
        #[arg(long)]
        timeout: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(false);
    let cli = Cli::parse();
    let credentials = Credentials::new(cli.auth_list, cli.cluster_info);

    match cli.command {
        Commands::Validate => {
            provider::validate_credentials(&credentials).await?;
            println!("✅ All clusters passed validation");
        }
        Commands::Health => {
            check_cluster_health(&credentials).await?;
        }
        Commands::Request {
            cluster,
            method,
            endpoint,
            body,
            timeout,
        } => {
            let body = body
                .map(|b| serde_json::from_str::<Value>(&b))
                .transpose()?;
            let params = ToolParameters {
                cluster_name: Some(cluster),
                cluster_address: None,
                endpoint,
                method,
                body,
                timeout,
            };
            let messages = ElasticsearchRestTool::new(credentials).invoke(&params).await;
            println!("{}", serde_json::to_string_pretty(&messages)?);
        }
    }

    Ok(())
}

async fn check_cluster_health(credentials: &Credentials) -> anyhow::Result<()> {
    let (cluster_map, auth_list) = credentials.parse()?;

    println!("🏥 Checking {} clusters...", cluster_map.len());
    for entry in cluster_map.iter() {
        let cluster = resolve_cluster(&cluster_map, &auth_list, &entry.name)?;
        let helper = match ElasticsearchHelper::for_cluster(&cluster) {
            Ok(helper) => helper,
            Err(e) => {
                println!("❌ {} ({}): {}", entry.name, entry.address, e);
                continue;
            }
        };
        match helper.cluster_health().await {
            Ok(health) => {
                let status = health
                    .get("status")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                println!("✅ {} ({}): {}", entry.name, entry.address, status);
            }
            Err(e) => println!("❌ {} ({}): {}", entry.name, entry.address, e),
        }
    }

    Ok(())
}
