use std::sync::Arc;

use clap::Parser;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use shelf_vision_dashboard::{
    adapters::{
        http::{router, state::HttpState},
        roboflow::client::RoboflowClient,
    },
    application::{dto::PublicConfig, services::AnalysisService},
    config::AppConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logs (RUST_LOG=info por defecto)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 2. Configuración externa: flags o variables de entorno, nunca en el código
    let cfg = AppConfig::parse();
    let endpoint = cfg.endpoint()?;
    let options = cfg.summary_options()?;

    tracing::info!("🔧 Modelo {} en {}", endpoint.model, endpoint.base_url);
    tracing::info!(
        "📏 Tolerancia de filas: {} px, desglose por producto: {}",
        options.row_tolerance,
        options.extended
    );

    // 3. Adaptador de inferencia y caso de uso
    let public_config = PublicConfig::new(&endpoint, &options);
    let inference = Arc::new(RoboflowClient::new(endpoint)?);
    let analysis = Arc::new(AnalysisService::new(inference, options));

    let state = HttpState {
        analysis,
        config: Arc::new(public_config),
    };

    // 4. Router de Axum y archivos estáticos
    let app = router(state)
        .fallback_service(ServeDir::new(&cfg.static_dir))
        .layer(TraceLayer::new_for_http());

    // 5. Lanzar el servidor
    let addr = cfg.bind_addr();
    tracing::info!("🚀 Dashboard iniciado en http://{}", addr);
    tracing::info!("📂 Archivos estáticos servidos desde {:?}", cfg.static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
