//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载卡片合成链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配，
//! 并由 HTTP 层决定 400 / 413 / 500 的映射。

use std::path::PathBuf;

/// 卡片合成统一错误类型。
///
/// 该类型会在请求边界被上转为 `AppError`，最终转换为 HTTP 错误响应。
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    /// 上传内容缺失或声明的类型不是图片。
    #[error("{0}")]
    InvalidUpload(String),

    /// 请求体超过配置的上传字节上限。
    #[error("上传内容过大：{0}")]
    UploadTooLarge(String),

    #[error("解码错误：{0}")]
    Decode(String),

    /// 宽或高为 0 的图片无法计算缩放比例。
    #[error("图片尺寸无效：{width}x{height}")]
    DegenerateGeometry { width: u32, height: u32 },

    /// 粘贴时源图层与遮罩尺寸不一致。
    #[error("图层尺寸不匹配：{0}")]
    LayerMismatch(String),

    #[error("素材加载失败 {path}：{reason}")]
    AssetLoad { path: PathBuf, reason: String },

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("内部错误：{0}")]
    Internal(String),
}

impl CardError {
    /// 稳定的机器可读错误码，用于日志检索。
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUpload(_) => "invalid_upload",
            Self::UploadTooLarge(_) => "upload_too_large",
            Self::Decode(_) => "decode_failed",
            Self::DegenerateGeometry { .. } => "degenerate_geometry",
            Self::LayerMismatch(_) => "layer_mismatch",
            Self::AssetLoad { .. } => "asset_load_failed",
            Self::ResourceLimit(_) => "resource_limit",
            Self::Encode(_) => "encode_failed",
            Self::Internal(_) => "internal",
        }
    }

    /// 出错所在的流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidUpload(_) | Self::UploadTooLarge(_) => "upload",
            Self::Decode(_) | Self::ResourceLimit(_) => "decode",
            Self::DegenerateGeometry { .. } => "resize",
            Self::LayerMismatch(_) => "composite",
            Self::AssetLoad { .. } => "assets",
            Self::Encode(_) => "encode",
            Self::Internal(_) => "internal",
        }
    }
}
