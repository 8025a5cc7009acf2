use pdsync_server::{build_app, AppState, SyncPipeline, WebhookAuth};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pdsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pipeline = SyncPipeline::from_config(&config)?;
    let auth = WebhookAuth::new(config.shopify_webhook_secret.clone());
    if !auth.enabled() && matches!(config.env, pdsync_core::Environment::Production) {
        tracing::warn!("SHOPIFY_WEBHOOK_SECRET is not set; webhook signatures are not verified");
    }
    if config.shopify_shop_domain.is_none() {
        tracing::info!("no default shop configured; deliveries must carry a shop domain header");
    }

    let app = build_app(
        AppState::new(pipeline, config.shopify_shop_domain.clone()),
        auth,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "pdsync-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
