//! # Rover Card — 服务入口
//!
//! 本文件仅负责日志、配置、素材加载与 HTTP 服务启动。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::sync::Arc;

use rover_card::card::{CardAssets, CardRenderer};
use rover_card::config::ServerConfig;
use rover_card::error::AppError;
use rover_card::server::{self, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🎴 启动 Rover Card 服务...");
    let config = ServerConfig::load()?;
    let card_config = config.card_config()?;

    // 素材缺失或损坏时直接退出，不进入可服务状态。
    let assets = CardAssets::load_from_dir(&config.asset_dir, card_config.canvas).map_err(|err| {
        log::error!("素材加载失败，服务无法启动: {err}");
        err
    })?;

    let renderer = CardRenderer::new(Arc::new(assets), card_config);
    let app = server::router(AppState::new(renderer), config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    log::info!(
        "📱 访问 http://localhost:{} 来使用 Rover Card 功能",
        config.port
    );

    server::serve(listener, app).await
}
