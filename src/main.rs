use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use state::AppState;
use vins_api::config;
use vins_api::search::SearchBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vins_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    config::init_config().map_err(|e| anyhow::anyhow!(e))?;
    let app_config = config::config();
    tracing::info!(
        "Server will listen on {}:{}",
        app_config.server.host,
        app_config.server.port
    );

    let state = Arc::new(AppState::new(app_config.clone())?);

    // Elasticsearch connection test, fail fast on a dead cluster / 启动时测试ES连接
    state
        .search
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Elasticsearch connection test failed: {}", e))?;
    tracing::info!(
        "Connected to Elasticsearch at {} (index: {})",
        app_config.elasticsearch.url,
        app_config.elasticsearch.index
    );

    let app = Router::new()
        // 服务信息与健康检查
        .route("/", get(api::health::root))
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        // VIN查询API
        .route("/api/vins/v1/vins", get(api::vins::list_vins))
        .route(
            "/api/vins/v1/vehicles/:vehicle_id/instances",
            get(api::vins::vehicle_instances),
        )
        // 模拟认证API
        .route("/api/auth/v1/login", post(api::auth::login))
        .route("/api/auth/v1/user", get(api::auth::current_user))
        .route("/api/auth/v1/verify", post(api::auth::verify))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Auto Discovery VINs API running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
