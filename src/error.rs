//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，所有 HTTP 处理函数统一返回 `Result<T, AppError>`，
//! 在请求边界把错误转换为带状态码的 JSON 响应（`{"detail": "..."}`），
//! 任何单次请求的失败都不会导致服务进程退出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `CardError` 提供 `From` 转换，无需手动 map。
//! - `InvalidUpload` → 400，`UploadTooLarge`（请求体超限）→ 413，其余 → 500，
//!   400 与 500 严格区分，不会被合并到同一个分支。
//! - 解码阶段的像素上限（`ResourceLimit`）属于处理失败，与损坏图片同样返回 500。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::card::CardError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 卡片合成流水线错误（上传 / 解码 / 合成 / 编码）
    #[error("{0}")]
    Card(#[from] CardError),

    /// 启动配置无效
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件系统或网络 I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Card(CardError::InvalidUpload(_)) => StatusCode::BAD_REQUEST,
            Self::Card(CardError::UploadTooLarge(_)) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的错误描述。
    pub fn detail(&self) -> String {
        match self {
            Self::Card(CardError::InvalidUpload(message)) => message.clone(),
            Self::Card(err @ CardError::UploadTooLarge(_)) => err.to_string(),
            other => format!("图片处理失败: {}", other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            Self::Card(err) if status.is_client_error() => {
                log::warn!("⚠️ 请求被拒绝 [{}@{}]: {}", err.code(), err.stage(), err);
            }
            Self::Card(err) => {
                log::error!("❌ 卡片处理失败 [{}@{}]: {}", err.code(), err.stage(), err);
            }
            other => log::error!("❌ 请求处理失败: {}", other),
        }

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
