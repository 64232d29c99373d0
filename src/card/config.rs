//! # 配置模块
//!
//! ## 设计思路
//!
//! 将合成流水线的“固定常量”和“可调策略”集中到 `CardConfig`。
//! 画布尺寸与图层偏移属于素材本身的属性（遮罩与前景在作者制作时就内置了 10px 横向边距），
//! 因此以常量形式给出；缩放滤镜与解码像素上限则可由进程配置调整。

use image::imageops::FilterType;

use super::CardError;

/// 卡片画布宽度（像素）。
pub const CANVAS_WIDTH: u32 = 560;
/// 卡片画布高度（像素）。
pub const CANVAS_HEIGHT: u32 = 1000;
/// 遮罩与前景相对主体图层的固定偏移。
pub const LAYER_OFFSET: (i64, i64) = (10, 0);

/// 画布尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 卡片的标准画布：560x1000。
    pub const fn card() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn dimensions(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::card()
    }
}

/// 合成流水线配置。
#[derive(Debug, Clone)]
pub struct CardConfig {
    /// 输出画布尺寸。
    pub canvas: CanvasSize,
    /// 遮罩与前景的粘贴偏移。
    pub layer_offset: (i64, i64),
    /// 主体缩放所用滤镜。
    pub resize_filter: FilterType,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::card(),
            layer_offset: LAYER_OFFSET,
            resize_filter: FilterType::CatmullRom,
            max_decoded_pixels: 40_000_000,
        }
    }
}

/// 从外部字符串解析缩放滤镜。
///
/// # 示例
/// ```rust
/// use rover_card::card::parse_resize_filter;
///
/// let filter = parse_resize_filter("lanczos3")?;
/// assert_eq!(filter, image::imageops::FilterType::Lanczos3);
/// # Ok::<(), rover_card::card::CardError>(())
/// ```
pub fn parse_resize_filter(name: &str) -> Result<FilterType, CardError> {
    match name.trim().to_lowercase().as_str() {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" | "bilinear" => Ok(FilterType::Triangle),
        "catmull_rom" | "catmullrom" | "bicubic" => Ok(FilterType::CatmullRom),
        "gaussian" => Ok(FilterType::Gaussian),
        "lanczos3" | "lanczos" => Ok(FilterType::Lanczos3),
        other => Err(CardError::Internal(format!(
            "未知缩放滤镜：{}（可选：nearest / triangle / catmull_rom / gaussian / lanczos3）",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_card_canvas_and_fixed_offset() {
        let config = CardConfig::default();

        assert_eq!(config.canvas.dimensions(), (560, 1000));
        assert_eq!(config.layer_offset, (10, 0));
        assert_eq!(config.resize_filter, FilterType::CatmullRom);
    }

    #[test]
    fn parse_resize_filter_accepts_aliases() {
        assert_eq!(parse_resize_filter(" Bicubic ").expect("alias"), FilterType::CatmullRom);
        assert_eq!(parse_resize_filter("bilinear").expect("alias"), FilterType::Triangle);
        assert!(parse_resize_filter("sinc").is_err());
    }
}
