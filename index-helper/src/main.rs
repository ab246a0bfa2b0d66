use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info};

use index_helper::{telemetry, AppError, Dependencies, HelperSettings};

#[derive(Parser)]
#[command(name = "index-helper")]
#[command(about = "Provision and inspect a search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print connection info and the resolved index URL
    Info,
    /// Print cluster statistics
    Stats,
    /// Check whether the index exists
    CheckIndex,
    /// Drop (if present) and recreate the index from the structure definition
    ResetIndex,
    /// Drop (if present) and recreate the mapping of one type
    ResetType {
        /// Type name as defined in the structure
        name: String,
    },
    /// Print per-type document counts
    Summary,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), AppError> {
    let settings = HelperSettings::from_env()?;
    let Dependencies { helper } = Dependencies::new(settings)?;

    match command {
        Commands::Info => {
            print_json(&serde_json::to_value(helper.service_help())?)?;
        }
        Commands::Stats => {
            print_json(&helper.get_cluster_stats().await?)?;
        }
        Commands::CheckIndex => match helper.check_index_available().await {
            Ok(()) => println!("index {} exists", helper.connection().name),
            Err(e) if e.is_not_found() => println!("index {} not found", helper.connection().name),
            Err(e) => return Err(e.into()),
        },
        Commands::ResetIndex => {
            helper.reset_index().await?;
            info!(url = %helper.index_url(), "Index reset");
        }
        Commands::ResetType { name } => {
            helper.reset_type(&name).await?;
            info!(type_name = %name, "Type reset");
        }
        Commands::Summary => {
            let report = helper.get_document_summary(None).await?;
            print_json(&serde_json::to_value(report)?)?;
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
