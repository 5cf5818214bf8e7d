use std::sync::Arc;

use ai_directory_core::core::app::{build_router, AppServices};
use ai_directory_core::core::config::Config;
use ai_directory_core::core::{database, server};
use ai_directory_core::features::ai_services::{AiServiceService, ServiceContentService};
use ai_directory_core::features::categories::CategoryService;
use ai_directory_core::features::dashboard::DashboardService;
use ai_directory_core::features::users::UserService;
use ai_directory_core::modules::webhook::WebhookNotifier;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let notifier = Arc::new(
        WebhookNotifier::new(&config.webhook)
            .map_err(|e| anyhow::anyhow!("Failed to initialize webhook notifier: {}", e))?,
    );
    match notifier.endpoint() {
        Some(endpoint) => tracing::info!(
            "Webhook notifier initialized ({:?}): {}",
            config.webhook.environment,
            endpoint
        ),
        None => tracing::warn!(
            "Webhook notifier disabled (no URL for {:?})",
            config.webhook.environment
        ),
    }

    let services = AppServices {
        categories: Arc::new(CategoryService::new(pool.clone())),
        ai_services: Arc::new(AiServiceService::new(pool.clone())),
        service_contents: Arc::new(ServiceContentService::new(pool.clone())),
        dashboard: Arc::new(DashboardService::new(pool.clone())),
        users: Arc::new(UserService::new(pool.clone(), Arc::clone(&notifier))),
    };
    tracing::info!("Feature services initialized");

    let app = build_router(services, &config.app, &config.swagger);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let listener = server::bind_listener(socket_addr)?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
