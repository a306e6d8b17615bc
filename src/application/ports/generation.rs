//! Generation Errors - 生成服务统一错误
//!
//! 所有生成端口共用同一个错误类型，限流通过类型化的变体表达

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HTTP 429 Too Many Requests
pub const RATE_LIMIT_STATUS: u16 = 429;

/// 生成错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// 被限流，由重试策略退避重试
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// 返回结构不符合预期，不重试
    #[error("Malformed result: {0}")]
    Malformed(String),

    /// 其他失败，不重试
    #[error("Generation failed: {0}")]
    Failed(String),
}

/// 面向用户通知的错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    RateLimited,
    MalformedResult,
    TransientFailure,
}

impl GenerationError {
    /// 由带状态码的响应构造错误，429 映射为限流
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == RATE_LIMIT_STATUS {
            Self::RateLimited(message)
        } else {
            Self::Failed(format!("HTTP {}: {}", status, message))
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }

    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::RateLimited(_) => GenerationErrorKind::RateLimited,
            Self::Malformed(_) => GenerationErrorKind::MalformedResult,
            Self::Failed(_) => GenerationErrorKind::TransientFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(GenerationError::from_status(429, "quota").is_rate_limited());

        let err = GenerationError::from_status(500, "boom");
        assert!(!err.is_rate_limited());
        assert_eq!(err.kind(), GenerationErrorKind::TransientFailure);
        assert_eq!(err.to_string(), "Generation failed: HTTP 500: boom");
    }

    #[test]
    fn test_message_text_does_not_imply_rate_limit() {
        let err = GenerationError::failed("upstream said 429 somewhere");
        assert!(!err.is_rate_limited());
    }
}
