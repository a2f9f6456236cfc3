use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hr_admin::{api, config::ServerConfig, db, service::HrService};

#[derive(Parser)]
#[command(name = "hr-admin")]
#[command(about = "Employee, project and assignment administration server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Interface to bind (overrides HR_ADMIN_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API (overrides HR_ADMIN_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file (overrides HR_ADMIN_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Create or upgrade the database schema and exit
    Migrate {
        /// SQLite database file (overrides HR_ADMIN_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "hr_admin=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<db::Database> {
    let path = match path {
        Some(path) => path,
        None => db::Database::default_path()?,
    };
    tracing::info!("Using database at {}", path.display());

    let db = db::Database::open(path)?;
    db.migrate()?;
    Ok(db)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = open_database(config.database_path.clone())?;
    let app = api::create_router_with_config(HrService::new(db), &config);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("hr-admin server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ServerConfig::from_env();

    match cli.command {
        Some(Commands::Serve { host, port, db }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if db.is_some() {
                config.database_path = db;
            }
            serve(config).await?;
        }
        Some(Commands::Migrate { db }) => {
            open_database(db.or(config.database_path))?;
            tracing::info!("Database schema is up to date");
        }
        None => {
            serve(config).await?;
        }
    }

    Ok(())
}
