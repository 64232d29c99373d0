//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `CardRenderer` 只负责流程编排，不直接与 HTTP 绑定。
//! 处理链路固定为：
//! 1. 解码上传字节并归一化为 RGBA
//! 2. 等比缩放并居中到画布
//! 3. 与遮罩、前景按固定顺序合成
//! 4. 编码为 PNG
//!
//! ## 实现思路
//!
//! - 素材以 `Arc<CardAssets>` 共享，启动后只读，读取无需加锁。
//! - 整条链路是同步纯计算，由调用方决定放在哪个线程执行。
//! - 记录 `decode/resize/composite/encode/total` 阶段耗时，便于性能诊断。

use std::sync::Arc;
use std::time::{Duration, Instant};

use image::RgbaImage;

use super::{
    CardAssets, CardConfig, CardError, composite, decode_upload, encode_png, resize_and_center,
};

/// 卡片渲染器。
#[derive(Debug, Clone)]
pub struct CardRenderer {
    assets: Arc<CardAssets>,
    config: CardConfig,
}

impl CardRenderer {
    /// 根据已加载的素材与配置创建渲染器。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use rover_card::card::{CardAssets, CardConfig, CardRenderer};
    ///
    /// let config = CardConfig::default();
    /// let assets = CardAssets::load_from_dir("assets/texture2d", config.canvas)?;
    /// let renderer = CardRenderer::new(Arc::new(assets), config);
    /// # Ok::<(), rover_card::card::CardError>(())
    /// ```
    pub fn new(assets: Arc<CardAssets>, config: CardConfig) -> Self {
        Self { assets, config }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// 对已解码的主体执行缩放与合成，返回最终卡片。
    pub fn compose(&self, subject: RgbaImage) -> Result<RgbaImage, CardError> {
        self.compose_timed(subject).map(|(card, _)| card)
    }

    /// 处理主入口：上传字节 → PNG 字节。
    pub fn render(&self, upload: &[u8]) -> Result<Vec<u8>, CardError> {
        let total_start = Instant::now();

        let decode_start = Instant::now();
        let subject = decode_upload(upload, &self.config)?;
        let decode_elapsed = decode_start.elapsed();
        let (source_width, source_height) = subject.dimensions();

        let (card, timings) = self.compose_timed(subject)?;

        let encode_start = Instant::now();
        let png = encode_png(&card)?;
        let encode_elapsed = encode_start.elapsed();

        log::info!(
            "✅ 卡片生成完成 - 原始尺寸: {}x{} 输出: {}KB decode={}ms resize={}ms composite={}ms encode={}ms total={}ms",
            source_width,
            source_height,
            png.len() / 1024,
            decode_elapsed.as_millis(),
            timings.resize.as_millis(),
            timings.composite.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(png)
    }

    /// 缩放居中 + 分层合成，`compose` 与 `render` 共用。
    fn compose_timed(&self, subject: RgbaImage) -> Result<(RgbaImage, ComposeTimings), CardError> {
        let resize_start = Instant::now();
        let centered = resize_and_center(subject, self.config.canvas, self.config.resize_filter)?;
        let resize = resize_start.elapsed();

        let composite_start = Instant::now();
        let card = composite(
            &centered,
            self.assets.mask(),
            self.assets.foreground(),
            self.config.canvas,
            self.config.layer_offset,
        )?;
        let composite = composite_start.elapsed();

        Ok((card, ComposeTimings { resize, composite }))
    }
}

struct ComposeTimings {
    resize: Duration,
    composite: Duration,
}
