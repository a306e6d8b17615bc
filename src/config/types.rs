//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::application::{RetryPolicy, StudioSettings};
use crate::domain::draft::Level;
use crate::domain::DEFAULT_PLACEHOLDER_COVER;
use crate::infrastructure::adapters::{FakeStoryGeneratorConfig, InMemoryLibraryConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 重试配置
    #[serde(default)]
    pub retry: RetryConfig,

    /// 工作室配置
    #[serde(default)]
    pub studio: StudioConfig,

    /// 离线生成服务配置
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// 书库配置
    #[serde(default)]
    pub library: LibraryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 转换为工作室设置
    pub fn studio_settings(&self) -> StudioSettings {
        StudioSettings {
            retry: self.retry.policy(),
            default_level: self.studio.default_level,
            default_genre: self.studio.default_genre.clone(),
            default_pages: self.studio.default_pages,
            min_pages: self.studio.min_pages,
            max_pages: self.studio.max_pages,
            placeholder_cover_url: self.studio.placeholder_cover_url.clone(),
            outcome_buffer: self.studio.outcome_buffer,
        }
    }
}

/// 限流重试配置
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// 最大重试次数
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// 首次退避时间（毫秒），之后每次翻倍
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    2000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.initial_backoff_ms))
    }
}

/// 工作室配置
#[derive(Debug, Clone, Deserialize)]
pub struct StudioConfig {
    /// 新书稿的默认语言等级
    #[serde(default)]
    pub default_level: Level,

    #[serde(default = "default_genre")]
    pub default_genre: String,

    #[serde(default = "default_pages")]
    pub default_pages: u32,

    #[serde(default = "default_min_pages")]
    pub min_pages: u32,

    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// 未生成封面时使用的占位图
    #[serde(default = "default_placeholder_cover_url")]
    pub placeholder_cover_url: String,

    /// 生成结果通道容量
    #[serde(default = "default_outcome_buffer")]
    pub outcome_buffer: usize,
}

fn default_genre() -> String {
    "Krimi".to_string()
}

fn default_pages() -> u32 {
    16
}

fn default_min_pages() -> u32 {
    8
}

fn default_max_pages() -> u32 {
    32
}

fn default_placeholder_cover_url() -> String {
    DEFAULT_PLACEHOLDER_COVER.to_string()
}

fn default_outcome_buffer() -> usize {
    64
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            default_level: Level::default(),
            default_genre: default_genre(),
            default_pages: default_pages(),
            min_pages: default_min_pages(),
            max_pages: default_max_pages(),
            placeholder_cover_url: default_placeholder_cover_url(),
            outcome_buffer: default_outcome_buffer(),
        }
    }
}

/// 离线生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// 每次调用的模拟延迟（毫秒）
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// 前 N 次调用模拟限流
    #[serde(default)]
    pub rate_limited_calls: u32,
}

fn default_latency_ms() -> u64 {
    150
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            rate_limited_calls: 0,
        }
    }
}

impl From<&GeneratorConfig> for FakeStoryGeneratorConfig {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            latency_ms: config.latency_ms,
            rate_limited_calls: config.rate_limited_calls,
        }
    }
}

/// 书库配置
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_author")]
    pub author: String,

    /// 估算阅读时长的每分钟词数
    #[serde(default = "default_reading_wpm")]
    pub reading_wpm: u32,
}

fn default_author() -> String {
    "AI Author".to_string()
}

fn default_reading_wpm() -> u32 {
    200
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            reading_wpm: default_reading_wpm(),
        }
    }
}

impl From<&LibraryConfig> for InMemoryLibraryConfig {
    fn from(config: &LibraryConfig) -> Self {
        Self {
            author: config.author.clone(),
            reading_wpm: config.reading_wpm,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
