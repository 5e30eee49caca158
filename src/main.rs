use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudinary_uploader::{public_id, Config, ResourceType, Service};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "cloudinary-uploader")]
#[command(about = "Upload assets to Cloudinary and manage their public IDs")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a file or every file under a directory.
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,
        /// Prefix stripped from file paths when computing public IDs.
        #[arg(long, default_value = "")]
        base_path: String,
        /// Leading folder added to every public ID.
        #[arg(long, default_value = "")]
        prepend: String,
        /// Compute public IDs without uploading anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the public ID contained in a delivery URL.
    PublicId {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Print the delivery URL of a public ID.
    Url {
        #[arg(value_name = "PUBLIC_ID")]
        public_id: String,
        #[arg(long)]
        raw: bool,
    },
    /// Delete an uploaded asset.
    Delete {
        #[arg(value_name = "PUBLIC_ID")]
        public_id: String,
        #[arg(long)]
        raw: bool,
    },
}

fn resource_type(raw: bool) -> ResourceType {
    if raw {
        ResourceType::Raw
    } else {
        ResourceType::Image
    }
}

async fn load_service(simulate: bool) -> Result<Service> {
    let mut config = Config::from_env()?;
    config.simulate |= simulate;
    Ok(Service::from_config(&config).await?)
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::PublicId { url } => {
            println!("{}", public_id(&url)?);
        }
        Command::Upload {
            path,
            base_path,
            prepend,
            dry_run,
        } => {
            let service = load_service(dry_run).await?;
            // Directories are their own base path.
            let results = if path.is_dir() {
                service.upload_dir(&path, &prepend).await?
            } else {
                vec![service.upload_file(&path, &base_path, &prepend).await?]
            };
            for result in results {
                println!("{}", result.public_id);
            }
        }
        Command::Url { public_id, raw } => {
            let service = load_service(false).await?;
            println!("{}", service.url(&public_id, resource_type(raw)));
        }
        Command::Delete { public_id, raw } => {
            let service = load_service(false).await?;
            service.delete(&public_id, resource_type(raw)).await?;
            info!("Deleted {}", public_id);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudinary_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match run(args.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Command failed: {}", e);
            std::process::exit(1);
        }
    }
}
