//! # 合成模块
//!
//! ## 设计思路
//!
//! 图层叠放顺序固定：
//! 1. 主体（已由几何模块缩放居中到画布尺寸）放到中间图层原点
//! 2. 中间图层以遮罩 alpha 为门控，粘贴到最终画布的 (10, 0)
//! 3. 前景以自身 alpha 为遮罩，粘贴到最终画布的 (10, 0)，位于最上层
//!
//! 每一步都在新分配的画布上进行，调用方传入的缓冲区只读不写。
//!
//! ## 实现思路
//!
//! `paste_with_mask` 对四个通道（含 alpha）做线性插值：
//! `out = round((src * m + dst * (255 - m)) / 255)`，`m` 取遮罩像素的 alpha。
//! 偏移允许为负或越界，只处理与目标画布重叠的区域。

use image::RgbaImage;

use super::{CanvasSize, CardError};

/// 以 `mask` 的 alpha 通道为门控，把 `src` 粘贴到 `dst` 的 `offset` 位置。
///
/// `mask` 必须与 `src` 尺寸一致。
pub fn paste_with_mask(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    offset: (i64, i64),
    mask: &RgbaImage,
) -> Result<(), CardError> {
    if src.dimensions() != mask.dimensions() {
        return Err(CardError::LayerMismatch(format!(
            "源图层 {}x{} 与遮罩 {}x{} 不一致",
            src.width(),
            src.height(),
            mask.width(),
            mask.height()
        )));
    }

    let (ox, oy) = offset;
    let x_start = ox.max(0);
    let y_start = oy.max(0);
    let x_end = (ox + i64::from(src.width())).min(i64::from(dst.width()));
    let y_end = (oy + i64::from(src.height())).min(i64::from(dst.height()));

    if x_start >= x_end || y_start >= y_end {
        return Ok(());
    }

    for y in y_start..y_end {
        let sy = (y - oy) as u32;
        for x in x_start..x_end {
            let sx = (x - ox) as u32;
            let m = mask.get_pixel(sx, sy)[3];
            if m == 0 {
                continue;
            }

            let source = src.get_pixel(sx, sy);
            let target = dst.get_pixel_mut(x as u32, y as u32);
            if m == u8::MAX {
                *target = *source;
                continue;
            }

            for c in 0..4 {
                target[c] = blend(source[c], target[c], m);
            }
        }
    }

    Ok(())
}

/// 线性插值并按 255 取整除。
#[inline]
fn blend(src: u8, dst: u8, m: u8) -> u8 {
    let m = u32::from(m);
    let tmp = u32::from(src) * m + u32::from(dst) * (255 - m) + 128;
    ((tmp + (tmp >> 8)) >> 8) as u8
}

/// 将主体、遮罩、前景按固定顺序合成为一张卡片。
///
/// # 示例
/// ```rust
/// use image::{Rgba, RgbaImage};
/// use rover_card::card::{composite, CanvasSize};
///
/// let subject = RgbaImage::from_pixel(560, 1000, Rgba([10, 20, 30, 255]));
/// let mask = RgbaImage::from_pixel(560, 1000, Rgba([0, 0, 0, 255]));
/// let foreground = RgbaImage::new(560, 1000);
///
/// let card = composite(&subject, &mask, &foreground, CanvasSize::card(), (10, 0))?;
/// assert_eq!(card.dimensions(), (560, 1000));
/// # Ok::<(), rover_card::card::CardError>(())
/// ```
pub fn composite(
    subject: &RgbaImage,
    mask: &RgbaImage,
    foreground: &RgbaImage,
    canvas: CanvasSize,
    layer_offset: (i64, i64),
) -> Result<RgbaImage, CardError> {
    if subject.dimensions() != canvas.dimensions() {
        return Err(CardError::LayerMismatch(format!(
            "主体 {}x{} 未对齐到画布 {}x{}",
            subject.width(),
            subject.height(),
            canvas.width,
            canvas.height
        )));
    }

    let mut layer = RgbaImage::new(canvas.width, canvas.height);
    paste_with_mask(&mut layer, subject, (0, 0), subject)?;

    let mut card = RgbaImage::new(canvas.width, canvas.height);
    paste_with_mask(&mut card, &layer, layer_offset, mask)?;
    paste_with_mask(&mut card, foreground, layer_offset, foreground)?;

    Ok(card)
}
