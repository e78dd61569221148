use std::path::PathBuf;

use anyhow::Context;
use aztft::{Aztft, Catalog, ResourceId, lro};
use aztft_core::config::AzureConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aztft")]
#[command(about = "Resolve Azure resource ids to Terraform azurerm resource types and import ids", long_about = None)]
struct Cli {
    /// Query Azure for live state where the answer depends on it
    #[arg(long, global = true)]
    api: bool,

    /// Resource catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding azure/config.ron
    #[arg(long, global = true, default_value = ".")]
    prefix: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the type and import id of a resource, and of its associations
    Query {
        /// Azure resource id
        id: ResourceId,
    },
    /// Print the azurerm type(s) of a resource
    Type {
        /// Azure resource id
        id: ResourceId,
    },
    /// Print the import id of a resource as the given azurerm type
    Id {
        /// Azure resource id
        id: ResourceId,
        /// azurerm resource type
        resource_type: String,
    },
    /// Print the write and operation status actions of the resource types listed in a file
    LroActions {
        /// File with one azurerm resource type per line
        file: PathBuf,
    },
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let custom_catalog = match &cli.catalog {
        Some(path) => Some(Catalog::load(path)?),
        None => None,
    };
    let catalog = match &custom_catalog {
        Some(catalog) => catalog,
        None => Catalog::builtin(),
    };

    let mut aztft = Aztft::with_catalog(catalog);
    if cli.api {
        let config = AzureConfig::try_load(&cli.prefix)?.with_env_overrides()?;
        aztft = aztft.with_config(&config)?;
    }

    match cli.command {
        Commands::Query { id } => {
            for resolved in aztft.query_type_and_id(&id, cli.api).await? {
                println!("{}\t{}", resolved.resource_type, resolved.import_id);
            }
        }
        Commands::Type { id } => {
            for resource_type in aztft.query_type(&id, cli.api).await? {
                println!("{}", resource_type);
            }
        }
        Commands::Id { id, resource_type } => {
            println!("{}", aztft.query_id(&id, &resource_type, cli.api).await?);
        }
        Commands::LroActions { file } => {
            let list = std::fs::read_to_string(&file).with_context(|| format!("reading {:?}", file))?;
            for action in lro::write_actions(catalog, lro::parse_type_list(&list))? {
                println!("{}\t{}", action.write, action.status);
            }
        }
    }

    Ok(())
}
