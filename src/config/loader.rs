//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::DEFAULT_PLACEHOLDER_COVER;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STUDIO_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `STUDIO_RETRY__MAX_RETRIES=5`
/// - `STUDIO_STUDIO__DEFAULT_GENRE=Fantasy`
/// - `STUDIO_GENERATOR__RATE_LIMITED_CALLS=2`
/// - `STUDIO_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("retry.max_retries", 3)?
        .set_default("retry.initial_backoff_ms", 2000)?
        .set_default("studio.default_level", "A2")?
        .set_default("studio.default_genre", "Krimi")?
        .set_default("studio.default_pages", 16)?
        .set_default("studio.min_pages", 8)?
        .set_default("studio.max_pages", 32)?
        .set_default("studio.placeholder_cover_url", DEFAULT_PLACEHOLDER_COVER)?
        .set_default("studio.outcome_buffer", 64)?
        .set_default("generator.latency_ms", 150)?
        .set_default("generator.rate_limited_calls", 0)?
        .set_default("library.author", "AI Author")?
        .set_default("library.reading_wpm", 200)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: STUDIO_RETRY__INITIAL_BACKOFF_MS=500
    builder = builder.add_source(
        Environment::with_prefix("STUDIO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.retry.initial_backoff_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Initial backoff cannot be 0".to_string(),
        ));
    }

    let studio = &config.studio;
    if studio.min_pages == 0 {
        return Err(ConfigError::ValidationError(
            "Minimum pages cannot be 0".to_string(),
        ));
    }
    if !(studio.min_pages..=studio.max_pages).contains(&studio.default_pages) {
        return Err(ConfigError::ValidationError(format!(
            "Default pages {} must lie within {}..={}",
            studio.default_pages, studio.min_pages, studio.max_pages
        )));
    }

    if studio.placeholder_cover_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Placeholder cover URL cannot be empty".to_string(),
        ));
    }

    if studio.outcome_buffer == 0 {
        return Err(ConfigError::ValidationError(
            "Outcome buffer cannot be 0".to_string(),
        ));
    }

    if config.library.reading_wpm == 0 {
        return Err(ConfigError::ValidationError(
            "Reading speed cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Studio Configuration ===");
    tracing::info!(
        "Retry: {} retries, initial backoff {}ms",
        config.retry.max_retries,
        config.retry.initial_backoff_ms
    );
    tracing::info!(
        "Defaults: {} / {} / {} pages (range {}..={})",
        config.studio.default_level,
        config.studio.default_genre,
        config.studio.default_pages,
        config.studio.min_pages,
        config.studio.max_pages
    );
    tracing::info!("Placeholder Cover: {}", config.studio.placeholder_cover_url);
    tracing::info!(
        "Generator: {}ms latency, {} rate-limited calls",
        config.generator.latency_ms,
        config.generator.rate_limited_calls
    );
    tracing::info!(
        "Library: author {}, {} wpm",
        config.library.author,
        config.library.reading_wpm
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("============================");
}
