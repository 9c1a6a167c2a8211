/// Setlist Server - playlist track transfer service
use clap::{Parser, Subcommand};
use setlist_core::{Provider, UserId};
use setlist_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use setlist_storage::playlists::{self, RegisterPlaylist};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "setlist-server")]
#[command(about = "Setlist playlist transfer server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "SETLIST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Load and validate the configuration, then exit
    CheckConfig,
    /// Record a provider playlist as an internal playlist owned by a user
    RegisterPlaylist {
        /// Owner user ID
        #[arg(short, long)]
        owner: String,
        /// Provider (soundcloud or spotify)
        #[arg(short, long)]
        provider: String,
        /// Playlist ID at the provider
        #[arg(long)]
        playlist_id: String,
        /// Display title
        #[arg(short, long)]
        title: String,
        /// Artwork URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// List the internal playlists owned by a user
    ListPlaylists {
        /// Owner user ID
        #[arg(short, long)]
        owner: String,
    },
    /// Issue a bearer token for a user ID
    IssueToken {
        /// User ID to put in the token subject
        #[arg(short, long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "setlist_server=info,setlist_transfer=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::CheckConfig => {
            config.validate()?;
            println!("Configuration OK");
            println!("  listen: {}:{}", config.server.host, config.server.port);
            println!("  database: {}", config.storage.database_url);
            for gateway in config.providers.gateways() {
                println!("  provider {}: {}", gateway.provider, gateway.base_url);
            }
        }
        Commands::RegisterPlaylist {
            owner,
            provider,
            playlist_id,
            title,
            image_url,
        } => {
            register_playlist(&config, &owner, &provider, playlist_id, title, image_url).await?;
        }
        Commands::ListPlaylists { owner } => {
            list_playlists(&config, &owner).await?;
        }
        Commands::IssueToken { user } => {
            config.validate()?;
            let auth_service =
                AuthService::new(config.auth.jwt_secret.clone(), config.auth.jwt_expiration_hours);
            println!("{}", auth_service.create_access_token(&UserId::new(user))?);
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Setlist Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = AppState::from_config(&config).await?;
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn register_playlist(
    config: &ServerConfig,
    owner: &str,
    provider: &str,
    provider_playlist_id: String,
    title: String,
    image_url: Option<String>,
) -> anyhow::Result<()> {
    let provider = Provider::parse(provider)
        .ok_or_else(|| anyhow::anyhow!("unknown provider '{provider}'"))?;

    let pool = setlist_storage::create_pool(&config.storage.database_url).await?;
    setlist_storage::run_migrations(&pool).await?;

    let playlist = playlists::register(
        &pool,
        RegisterPlaylist {
            owner_user_id: UserId::new(owner),
            provider,
            provider_playlist_id,
            title,
            image_url,
        },
    )
    .await?;

    println!(
        "Registered playlist {} ({}:{}) for {}",
        playlist.id, playlist.provider, playlist.provider_playlist_id, playlist.owner_user_id
    );
    Ok(())
}

async fn list_playlists(config: &ServerConfig, owner: &str) -> anyhow::Result<()> {
    let pool = setlist_storage::create_pool(&config.storage.database_url).await?;
    setlist_storage::run_migrations(&pool).await?;

    let owned = playlists::list_by_owner(&pool, &UserId::new(owner)).await?;

    println!("Playlists:");
    for playlist in owned {
        println!(
            "  {} - {} ({}:{})",
            playlist.id, playlist.title, playlist.provider, playlist.provider_playlist_id
        );
    }

    Ok(())
}
