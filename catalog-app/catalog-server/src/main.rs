use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{debug, info, warn};

use catalog_api::{router, AppState, LoginRateLimiter, Repositories};
use catalog_infrastructure::{
    create_pool, run_migrations, PgBrandRepository, PgCatalogRepository, PgCategoryRepository, PgCustomerRepository,
    PgFrameMaterialRepository, PgMenuRepository, PgPermissionRepository, PgProductRepository, PgRoleRepository,
    PgSeriesRepository, PgSysRoleRepository, PgSysUserRepository,
};
use catalog_shared::config::{AppConfig, CorsSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;
    config.check_secrets()?;

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = catalog_shared::telemetry::init_telemetry(&config.log)?;

    info!(env = %config.app.env, "Catalog server starting...");

    // Connect to Database
    let pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    // Wire repositories into the services
    let repos = Repositories {
        categories: Arc::new(PgCategoryRepository::new(pool.clone())),
        permissions: Arc::new(PgPermissionRepository::new(pool.clone())),
        menus: Arc::new(PgMenuRepository::new(pool.clone())),
        brands: Arc::new(PgBrandRepository::new(pool.clone())),
        sys_users: Arc::new(PgSysUserRepository::new(pool.clone())),
        sys_roles: Arc::new(PgSysRoleRepository::new(pool.clone())),
        customers: Arc::new(PgCustomerRepository::new(pool.clone())),
        roles: Arc::new(PgRoleRepository::new(pool.clone())),
        frame_materials: Arc::new(PgFrameMaterialRepository::new(pool.clone())),
        series: Arc::new(PgSeriesRepository::new(pool.clone())),
        products: Arc::new(PgProductRepository::new(pool.clone())),
        catalog: Arc::new(PgCatalogRepository::new(pool)),
    };

    let addr = SocketAddr::from((config.app.host.parse::<std::net::IpAddr>()?, config.app.port));
    let cors = cors_layer(&config.cors);
    let cleanup_every = Duration::from_secs(config.rate_limit.cleanup_interval_seconds.max(1));
    let state = AppState::new(config, repos);
    tokio::spawn(purge_login_limiter(state.login_limiter.clone(), cleanup_every));

    let app: Router = router(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(false)))
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Catalog server stopped");
    Ok(())
}

/// Drops idle addresses from the login limiter so its key map stays bounded.
async fn purge_login_limiter(limiter: Arc<LoginRateLimiter>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let tracked = limiter.purge_idle();
        debug!(tracked, "Login limiter purged");
    }
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
