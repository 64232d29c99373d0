//! # HTTP 服务层
//!
//! ## 设计思路
//!
//! 使用 `AppState` 作为 axum 注入状态，替代全局单例：
//! 渲染器（含只读素材）在 `main.rs` 启动时构建一次，之后按引用计数在请求间共享。
//!
//! - `GET /`：上传页面
//! - `POST /rover-card/`：上传图片并返回合成后的 PNG

mod routes;
mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::card::CardRenderer;
use crate::error::AppError;

pub use upload::{IMAGE_FIELD_NAME, UploadedImage, is_image_content_type};

/// 请求间共享的服务状态。
#[derive(Debug, Clone)]
pub struct AppState {
    pub renderer: Arc<CardRenderer>,
}

impl AppState {
    pub fn new(renderer: CardRenderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }
}

/// 构建路由。
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::upload_page))
        .route("/rover-card/", post(routes::rover_card))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// 在给定监听器上提供服务，收到 Ctrl-C 后优雅退出。
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("监听退出信号失败: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("👋 收到退出信号，停止接收新请求");
}
