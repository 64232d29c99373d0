//! # 编码模块
//!
//! 输出格式固定为 PNG（RGBA8）：无损且保留 alpha 通道，卡片的异形轮廓依赖透明度。

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use super::CardError;

/// 响应的 MIME 类型。
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// 将合成结果编码为 PNG 字节。
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CardError> {
    let (width, height) = image.dimensions();
    let mut buffer = Vec::with_capacity((width as usize * height as usize) / 2);

    PngEncoder::new(&mut buffer)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| CardError::Encode(format!("PNG 编码失败：{}", e)))?;

    Ok(buffer)
}
