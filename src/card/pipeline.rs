//! # 解码流水线模块
//!
//! ## 设计思路
//!
//! 将“上传字节 → 图像 → RGBA”的过程集中管理，并在完整解码前做像素上限控制，
//! 降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 空字节直接拒绝
//! 2. 猜测格式并仅读取 header 尺寸
//! 3. 按像素上限快速拒绝
//! 4. 完整解码，失败时附带 `infer` 嗅探到的真实类型便于诊断
//! 5. 统一转换为 RGBA8

use image::{ImageReader, RgbaImage};
use std::io::Cursor;

use super::{CardConfig, CardError};

/// 解码上传的图片字节并归一化为 RGBA。
pub fn decode_upload(bytes: &[u8], config: &CardConfig) -> Result<RgbaImage, CardError> {
    if bytes.is_empty() {
        return Err(CardError::Decode("上传内容为空".to_string()));
    }

    let (header_width, header_height) = inspect_dimensions(bytes)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory(bytes).map_err(|e| {
        CardError::Decode(format!("图片解码失败：{}{}", e, sniffed_hint(bytes)))
    })?;

    let rgba = decoded.to_rgba8();
    validate_pixel_limits(config, rgba.width(), rgba.height())?;

    Ok(rgba)
}

/// 仅通过图片头信息读取宽高。
fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), CardError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CardError::Decode(format!("无法识别图片格式：{}", e)))?;

    reader.into_dimensions().map_err(|e| {
        CardError::Decode(format!("无法读取图片尺寸：{}{}", e, sniffed_hint(bytes)))
    })
}

fn validate_pixel_limits(config: &CardConfig, width: u32, height: u32) -> Result<(), CardError> {
    let pixels = u64::from(width) * u64::from(height);

    if pixels > config.max_decoded_pixels {
        return Err(CardError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}

/// 嗅探字节签名，给错误信息补充实际类型。
fn sniffed_hint(bytes: &[u8]) -> String {
    match infer::get(bytes) {
        Some(kind) => format!("（检测到的类型：{}）", kind.mime_type()),
        None => String::new(),
    }
}
