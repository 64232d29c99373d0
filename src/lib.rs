//! # Rover Card — 库入口
//!
//! 接收用户上传的角色立绘，将其合成到固定尺寸（560x1000）的卡片模板上
//! （遮罩 + 前景装饰），返回 PNG。
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  浏览器  GET /（上传页）   POST /rover-card/（multipart）  │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ HTTP (Result<Response, AppError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError（400 / 413 / 500 映射）         │
//! │  ├─ config ───── ServerConfig（默认值 / JSON / 环境变量） │
//! │  ├─ server ───── axum 路由 + AppState 注入               │
//! │  └─ card ─────── 核心流水线                               │
//! │      ├─ assets      启动时加载的遮罩与前景                │
//! │      ├─ pipeline    解码 + 像素限制                       │
//! │      ├─ geometry    等比缩放 + 居中                       │
//! │      ├─ compositor  主体 → 遮罩 → 前景                    │
//! │      └─ encoder     PNG                                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，负责转换为 HTTP 错误响应 |
//! | [`config`] | 服务配置加载与校验 |
//! | [`card`] | 图片解码、缩放居中、图层合成与编码 |
//! | [`server`] | HTTP 路由与请求处理 |

pub mod card;
pub mod config;
pub mod error;
pub mod server;
