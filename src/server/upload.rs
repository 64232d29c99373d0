//! # 上传数据模型
//!
//! `UploadedImage` 表示已从 multipart 中取出、但尚未解码的图片字节。

use bytes::Bytes;

/// 上传表单中承载图片的字段名。
pub const IMAGE_FIELD_NAME: &str = "image";

/// 已接收的上传文件。
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// 原始图片字节。
    pub bytes: Bytes,
    /// 客户端声明的内容类型。
    pub content_type: String,
    /// 客户端声明的文件名（仅用于日志）。
    pub file_name: Option<String>,
}

/// 判断声明的内容类型是否为图片（忽略大小写与参数部分）。
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false)
}
