//! # 几何缩放模块
//!
//! ## 设计思路
//!
//! 将任意尺寸的主体图片等比缩放到目标画布内，并居中放置在全透明背景上。
//! 输出尺寸恒等于目标画布，较长边（按宽高比较结果）恰好铺满对应的画布边。
//!
//! ## 实现思路
//!
//! 1. `fit_dimensions` 纯函数计算缩放后尺寸（宽 > 高按宽缩放，否则按高缩放，
//!    宽高相等走“按高”分支）
//! 2. 优先使用 `fast_image_resize` 重采样，失败时回退 `image::imageops::resize`
//! 3. `center_offset` 以向下取整的方式计算居中偏移，余数为奇数时偏向左上
//! 4. 以缩放图自身的 alpha 作为遮罩粘贴到新画布

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::RgbaImage;

use super::compositor::paste_with_mask;
use super::{CanvasSize, CardError};

/// 计算等比缩放后的尺寸。
///
/// 零宽或零高的输入直接返回 `DegenerateGeometry`，避免除零。
pub fn fit_dimensions(source: (u32, u32), target: CanvasSize) -> Result<(u32, u32), CardError> {
    let (width, height) = source;
    if width == 0 || height == 0 {
        return Err(CardError::DegenerateGeometry { width, height });
    }
    if target.width == 0 || target.height == 0 {
        return Err(CardError::DegenerateGeometry {
            width: target.width,
            height: target.height,
        });
    }

    if width > height {
        let scale = f64::from(target.width) / f64::from(width);
        Ok((target.width, scaled_side(height, scale)))
    } else {
        let scale = f64::from(target.height) / f64::from(height);
        Ok((scaled_side(width, scale), target.height))
    }
}

/// 按比例缩放单边，四舍六入五取偶，且至少保留 1 像素。
fn scaled_side(side: u32, scale: f64) -> u32 {
    let scaled = (f64::from(side) * scale).round_ties_even();
    scaled.clamp(1.0, f64::from(u32::MAX)) as u32
}

/// 计算居中粘贴偏移（向下取整）。
///
/// 缩放尺寸大于画布时偏移为负，粘贴阶段会裁剪越界部分。
pub fn center_offset(target: CanvasSize, scaled: (u32, u32)) -> (i64, i64) {
    let dx = i64::from(target.width) - i64::from(scaled.0);
    let dy = i64::from(target.height) - i64::from(scaled.1);
    (dx.div_euclid(2), dy.div_euclid(2))
}

/// 将图片等比缩放并居中放置到透明画布上。
///
/// 主体按值传入：解码结果由调用方独占，缩放时直接复用其像素缓冲。
///
/// # 示例
/// ```rust
/// use image::{Rgba, RgbaImage};
/// use rover_card::card::{resize_and_center, CanvasSize};
///
/// let landscape = RgbaImage::from_pixel(1000, 500, Rgba([200, 40, 40, 255]));
/// let centered = resize_and_center(
///     landscape,
///     CanvasSize::card(),
///     image::imageops::FilterType::Triangle,
/// )?;
/// assert_eq!(centered.dimensions(), (560, 1000));
/// # Ok::<(), rover_card::card::CardError>(())
/// ```
pub fn resize_and_center(
    image: RgbaImage,
    target: CanvasSize,
    filter: FilterType,
) -> Result<RgbaImage, CardError> {
    let (source_width, source_height) = image.dimensions();
    let (new_width, new_height) = fit_dimensions((source_width, source_height), target)?;
    let scaled = resample(image, new_width, new_height, filter)?;

    let mut canvas = RgbaImage::new(target.width, target.height);
    let offset = center_offset(target, (new_width, new_height));
    paste_with_mask(&mut canvas, &scaled, offset, &scaled)?;

    log::debug!(
        "📐 主体缩放：{}x{} -> {}x{}，偏移 ({}, {})",
        source_width,
        source_height,
        new_width,
        new_height,
        offset.0,
        offset.1
    );

    Ok(canvas)
}

/// 重采样到 `width x height`。
///
/// 像素缓冲直接移交给 `fast_image_resize`；卷积失败时从源缓冲取回像素，
/// 改用 `image::imageops::resize`。
fn resample(
    image: RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RgbaImage, CardError> {
    let (source_width, source_height) = image.dimensions();
    if (source_width, source_height) == (width, height) {
        return Ok(image);
    }

    let source = fr::images::Image::from_vec_u8(
        source_width,
        source_height,
        image.into_raw(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| CardError::Internal(format!("主体像素无法移交给缩放器：{}", e)))?;
    let mut scaled = fr::images::Image::new(width, height, fr::PixelType::U8x4);
    let options = fr::ResizeOptions::new().resize_alg(resize_alg_for(filter));

    if let Err(err) = fr::Resizer::new().resize(&source, &mut scaled, &options) {
        log::warn!("⚠️ 卷积缩放失败，改用 image::imageops::resize：{}", err);
        let original = RgbaImage::from_raw(source_width, source_height, source.into_vec())
            .ok_or_else(|| CardError::Internal("取回主体像素失败".to_string()))?;
        return Ok(image::imageops::resize(&original, width, height, filter));
    }

    RgbaImage::from_raw(width, height, scaled.into_vec())
        .ok_or_else(|| CardError::Internal("缩放结果与目标尺寸不符".to_string()))
}

/// `image` 滤镜名到缩放算法的对应关系。
fn resize_alg_for(filter: FilterType) -> fr::ResizeAlg {
    let kernel = match filter {
        FilterType::Nearest => return fr::ResizeAlg::Nearest,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    };
    fr::ResizeAlg::Convolution(kernel)
}
