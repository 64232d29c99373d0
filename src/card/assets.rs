//! # 素材仓库模块
//!
//! ## 设计思路
//!
//! 遮罩（`char_mask.png`）与前景（`char_fg.png`）在进程启动时加载一次，
//! 之后以只读形式在所有请求间共享（`Arc<CardAssets>`），不做任何按请求的重载。
//! 任一素材缺失或无法解码都视为致命错误，进程不会进入可服务状态。

use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::{CanvasSize, CardError};

/// 遮罩素材文件名。
pub const MASK_FILE_NAME: &str = "char_mask.png";
/// 前景素材文件名。
pub const FOREGROUND_FILE_NAME: &str = "char_fg.png";

/// 卡片模板素材（只读）。
#[derive(Debug, Clone)]
pub struct CardAssets {
    mask: RgbaImage,
    foreground: RgbaImage,
}

impl CardAssets {
    /// 从素材目录加载遮罩与前景。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use rover_card::card::{CanvasSize, CardAssets};
    ///
    /// let assets = CardAssets::load_from_dir("assets/texture2d", CanvasSize::card())?;
    /// # Ok::<(), rover_card::card::CardError>(())
    /// ```
    pub fn load_from_dir(dir: impl AsRef<Path>, canvas: CanvasSize) -> Result<Self, CardError> {
        let dir = dir.as_ref();
        let mask_path = dir.join(MASK_FILE_NAME);
        let foreground_path = dir.join(FOREGROUND_FILE_NAME);

        let mask = load_rgba(&mask_path)?;
        let foreground = load_rgba(&foreground_path)?;

        log::info!(
            "🖼️ 素材加载完成 - 遮罩: {}x{} 前景: {}x{} 目录: {}",
            mask.width(),
            mask.height(),
            foreground.width(),
            foreground.height(),
            dir.display()
        );

        Self::validated(mask, foreground, canvas).map_err(|err| match err {
            CardError::LayerMismatch(reason) => CardError::AssetLoad {
                path: mask_path,
                reason,
            },
            other => other,
        })
    }

    /// 使用内存中的图片构建素材（测试或嵌入式部署使用）。
    pub fn from_images(
        mask: RgbaImage,
        foreground: RgbaImage,
        canvas: CanvasSize,
    ) -> Result<Self, CardError> {
        Self::validated(mask, foreground, canvas)
    }

    fn validated(
        mask: RgbaImage,
        foreground: RgbaImage,
        canvas: CanvasSize,
    ) -> Result<Self, CardError> {
        // 遮罩门控整张主体图层，必须与画布等大。
        if mask.dimensions() != canvas.dimensions() {
            return Err(CardError::LayerMismatch(format!(
                "遮罩尺寸 {}x{} 与画布 {}x{} 不一致",
                mask.width(),
                mask.height(),
                canvas.width,
                canvas.height
            )));
        }
        if foreground.width() == 0 || foreground.height() == 0 {
            return Err(CardError::DegenerateGeometry {
                width: foreground.width(),
                height: foreground.height(),
            });
        }

        Ok(Self { mask, foreground })
    }

    pub fn mask(&self) -> &RgbaImage {
        &self.mask
    }

    pub fn foreground(&self) -> &RgbaImage {
        &self.foreground
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage, CardError> {
    let to_error = |reason: String| CardError::AssetLoad {
        path: PathBuf::from(path),
        reason,
    };

    if !path.exists() {
        return Err(to_error("文件不存在".to_string()));
    }

    let decoded = image::open(path).map_err(|e| to_error(e.to_string()))?;
    Ok(decoded.to_rgba8())
}
