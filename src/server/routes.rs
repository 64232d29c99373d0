//! # HTTP 路由处理层
//!
//! ## 设计思路
//!
//! 处理函数只做请求参数接收与响应组装，不承载业务逻辑。
//! 实际处理交由 `CardRenderer`，并放到 tokio 的阻塞线程池执行，避免占用异步调度线程。

use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

use super::AppState;
use super::upload::{IMAGE_FIELD_NAME, UploadedImage, is_image_content_type};
use crate::card::{CardError, PNG_MEDIA_TYPE};
use crate::error::AppError;

const INDEX_HTML: &str = include_str!("../../templates/index.html");
const INVALID_UPLOAD_MESSAGE: &str = "请上传有效的图片文件";
const CONTENT_DISPOSITION_VALUE: &str = "inline; filename=processed_card.png";

/// 返回图片上传页面。
pub async fn upload_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// 处理上传的图片并返回合成后的卡片。
pub async fn rover_card(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        CardError::InvalidUpload(format!("{}：{}", INVALID_UPLOAD_MESSAGE, rejection.body_text()))
    })?;
    let upload = read_image_field(&mut multipart).await?;

    log::info!(
        "📥 收到上传 - 文件: {} 类型: {} 大小: {}KB",
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.content_type,
        upload.bytes.len() / 1024
    );

    let renderer = Arc::clone(&state.renderer);
    let png = tokio::task::spawn_blocking(move || renderer.render(&upload.bytes))
        .await
        .map_err(|e| CardError::Internal(format!("渲染任务异常退出：{}", e)))??;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PNG_MEDIA_TYPE),
            (header::CONTENT_DISPOSITION, CONTENT_DISPOSITION_VALUE),
        ],
        png,
    )
        .into_response())
}

/// 取出 `image` 字段；类型不是 `image/*` 时在读取内容前直接拒绝。
async fn read_image_field(multipart: &mut Multipart) -> Result<UploadedImage, CardError> {
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some(IMAGE_FIELD_NAME) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_image_content_type(&content_type) {
            return Err(CardError::InvalidUpload(INVALID_UPLOAD_MESSAGE.to_string()));
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(map_multipart_error)?;

        return Ok(UploadedImage {
            bytes,
            content_type,
            file_name,
        });
    }

    Err(CardError::InvalidUpload(INVALID_UPLOAD_MESSAGE.to_string()))
}

fn map_multipart_error(err: MultipartError) -> CardError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CardError::UploadTooLarge(err.body_text())
    } else {
        CardError::InvalidUpload(format!("{}：{}", INVALID_UPLOAD_MESSAGE, err.body_text()))
    }
}
