//! # 卡片合成模块（card）
//!
//! ## 设计思路
//!
//! 该模块将“上传解码 → 等比缩放居中 → 遮罩/前景合成 → PNG 编码”
//! 按职责拆分为多个子模块，HTTP 层只与 `CardRenderer` 打交道。
//!
//! - `assets`：启动时加载一次的遮罩与前景（只读共享）
//! - `pipeline`：上传字节解码、像素上限、RGBA 归一化
//! - `geometry`：等比缩放与居中
//! - `compositor`：带遮罩粘贴与固定顺序的图层叠放
//! - `encoder`：PNG 输出
//! - `handler`：编排整条处理流水线
//! - `config/error`：配置与错误
//!
//! ## 新同事快速上手
//!
//! ```text
//! POST /rover-card/
//!    ↓
//! server/routes.rs（multipart 解析 + 类型校验）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ pipeline.rs（解码 + 像素限制）
//!    ├─ geometry.rs（缩放 + 居中）
//!    ├─ compositor.rs（主体 → 遮罩 → 前景）
//!    └─ encoder.rs（PNG）
//!    ↓
//! 返回 PNG 字节或 CardError
//! ```

mod assets;
mod compositor;
mod config;
mod encoder;
mod error;
mod geometry;
mod handler;
mod pipeline;

pub use assets::{CardAssets, FOREGROUND_FILE_NAME, MASK_FILE_NAME};
pub use compositor::{composite, paste_with_mask};
pub use config::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CanvasSize, CardConfig, LAYER_OFFSET, parse_resize_filter,
};
pub use encoder::{PNG_MEDIA_TYPE, encode_png};
pub use error::CardError;
pub use geometry::{center_offset, fit_dimensions, resize_and_center};
pub use handler::CardRenderer;
pub use pipeline::decode_upload;
