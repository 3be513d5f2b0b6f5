use clap::{Parser, Subcommand};
use cp_card::{
    card::{normalize_username, CardBuilder, Clock},
    config::Settings,
    render::{fallback_layout_json, render_card_svg},
    server::{self, AppState},
    upstream::{HttpProfileFetcher, OfflineFetcher, ProfileFetcher},
};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "cp-card")]
#[clap(about = "Render competitive-programming profile cards with an activity heatmap", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[clap(long)]
        host: Option<String>,

        /// Port to listen on
        #[clap(short, long)]
        port: Option<u16>,
    },

    /// Render one card as SVG
    Render {
        /// Profile username
        #[clap(short, long)]
        user: String,

        /// Last day of the heatmap (YYYY-MM-DD), defaults to today
        #[clap(short, long)]
        date: Option<String>,

        /// Skip the upstream fetch and use fallback data
        #[clap(long)]
        offline: bool,

        /// Write to this file instead of stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the fallback heatmap layout for a user as JSON
    Layout {
        /// Profile username
        #[clap(short, long)]
        user: String,

        /// Last day of the heatmap (YYYY-MM-DD), defaults to today
        #[clap(short, long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Using default settings: {}", e);
        Settings::default()
    });

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Validate settings
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    match cli.command {
        Commands::Serve { host, port } => {
            let mut settings = settings;
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            info!("Starting {} v{}", settings.app.name, settings.app.version);
            let fetcher = Arc::new(HttpProfileFetcher::new(&settings.upstream)?);
            let state = AppState::new(settings, fetcher, Clock::System);
            server::serve(state).await?;
        }

        Commands::Render { user, date, offline, output } => {
            let user = normalize_username(&user)?;
            let today = Clock::from_arg(date.as_deref())?.today();
            let fetcher: Arc<dyn ProfileFetcher> = if offline {
                Arc::new(OfflineFetcher)
            } else {
                Arc::new(HttpProfileFetcher::new(&settings.upstream)?)
            };

            let builder = CardBuilder::new(fetcher, &settings);
            let card = builder.build(user, today).await;
            let svg = render_card_svg(&card, settings.grid_geometry());

            match output {
                Some(path) => {
                    tokio::fs::write(&path, svg).await?;
                    info!("Wrote card for {} to {}", user, path.display());
                }
                None => print!("{}", svg),
            }
        }

        Commands::Layout { user, date } => {
            let user = normalize_username(&user)?;
            let today = Clock::from_arg(date.as_deref())?.today();
            println!("{}", fallback_layout_json(user, today, settings.grid_geometry())?);
        }
    }

    Ok(())
}
