//! # 进程配置
//!
//! 加载顺序：默认值 → `ROVER_CARD_CONFIG` 指向的 JSON 文件（字段均可省略）→ 环境变量。
//! 任何非法值都在启动阶段报错，不会带着错误配置进入服务状态。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::card::{CardConfig, parse_resize_filter};
use crate::error::AppError;

pub const CONFIG_PATH_ENV: &str = "ROVER_CARD_CONFIG";
const HOST_ENV: &str = "ROVER_CARD_HOST";
const PORT_ENV: &str = "ROVER_CARD_PORT";
const ASSET_DIR_ENV: &str = "ROVER_CARD_ASSET_DIR";
const MAX_UPLOAD_BYTES_ENV: &str = "ROVER_CARD_MAX_UPLOAD_BYTES";
const MAX_DECODED_PIXELS_ENV: &str = "ROVER_CARD_MAX_DECODED_PIXELS";
const RESIZE_FILTER_ENV: &str = "ROVER_CARD_RESIZE_FILTER";

/// 服务配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址。
    pub host: String,
    /// 监听端口。
    pub port: u16,
    /// 遮罩与前景素材目录。
    pub asset_dir: PathBuf,
    /// 单次请求体上限（字节）。
    pub max_upload_bytes: usize,
    /// 解码后的像素上限。
    pub max_decoded_pixels: u64,
    /// 主体缩放滤镜名称。
    pub resize_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8108,
            asset_dir: PathBuf::from("assets/texture2d"),
            max_upload_bytes: 20 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            resize_filter: "catmull_rom".to_string(),
        }
    }
}

impl ServerConfig {
    /// 从当前进程环境加载配置。
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 按给定的变量查找函数加载配置，便于测试注入。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(host) = lookup(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.port = parse_env(PORT_ENV, &port)?;
        }
        if let Some(dir) = lookup(ASSET_DIR_ENV) {
            config.asset_dir = PathBuf::from(dir);
        }
        if let Some(bytes) = lookup(MAX_UPLOAD_BYTES_ENV) {
            config.max_upload_bytes = parse_env(MAX_UPLOAD_BYTES_ENV, &bytes)?;
        }
        if let Some(pixels) = lookup(MAX_DECODED_PIXELS_ENV) {
            config.max_decoded_pixels = parse_env(MAX_DECODED_PIXELS_ENV, &pixels)?;
        }
        if let Some(filter) = lookup(RESIZE_FILTER_ENV) {
            config.resize_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("读取配置文件 {} 失败: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("解析配置文件 {} 失败: {}", path.display(), e)))
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.host.trim().is_empty() {
            return Err(AppError::Config("host 不能为空".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(AppError::Config("max_upload_bytes 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(AppError::Config("max_decoded_pixels 必须大于 0".to_string()));
        }
        self.card_config()?;
        Ok(())
    }

    /// 监听地址字符串，例如 `0.0.0.0:8108`。
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 派生合成流水线配置。
    pub fn card_config(&self) -> Result<CardConfig, AppError> {
        let resize_filter = parse_resize_filter(&self.resize_filter)
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(CardConfig {
            resize_filter,
            max_decoded_pixels: self.max_decoded_pixels,
            ..CardConfig::default()
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| AppError::Config(format!("{} 的值 {:?} 无效: {}", key, value, e)))
}
