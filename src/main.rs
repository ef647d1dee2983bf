use std::sync::Arc;

use backend_blog::{
    config::Config,
    mail::sendmail::build_mailer,
    repositories::{
        posts_repo::PostsRepository, user_repo::UserRepository, InMemoryRepo, PostgresRepo,
    },
    routes::create_router,
    AppState,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,backend_blog=debug,tower_http=debug"));

    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

type Repos = (Arc<dyn PostsRepository>, Arc<dyn UserRepository>);

async fn connect_store(config: &Config) -> Repos {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, using the in-memory store");
        let repo = Arc::new(InMemoryRepo::new());
        let posts: Arc<dyn PostsRepository> = repo.clone();
        let users: Arc<dyn UserRepository> = repo;
        return (posts, users);
    };

    let pool = match PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await
    {
        Ok(pool) => {
            info!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            error!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let repo = Arc::new(PostgresRepo::new(pool));
    if let Err(err) = repo.migrate().await {
        error!("🔥 Failed to run migrations: {}", err);
        std::process::exit(1);
    }

    let posts: Arc<dyn PostsRepository> = repo.clone();
    let users: Arc<dyn UserRepository> = repo;
    (posts, users)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::init();
    let (posts_repo, users_repo) = connect_store(&config).await;
    let mailer = match build_mailer(config.smtp.as_ref()) {
        Ok(mailer) => mailer,
        Err(err) => {
            error!("🔥 SMTP is configured but unusable: {}", err);
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config.clone(), posts_repo, users_repo, mailer);
    let app = create_router(Arc::new(app_state));

    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("🔥 Failed to bind {}: {}", config.bind_address(), err);
            std::process::exit(1);
        }
    };
    info!("🚀 Listening on {}", config.bind_address());

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
}
