//! 错误处理模块
//!
//! 定义了图形上下文相关的统一错误类型。
//!
//! `GraphicsContext::initialize` 与 `is_initialized` 本身不会失败，
//! 这里的错误只出现在配置加载、日志初始化，以及外部设备创建代码
//! 写入或检查上下文的时候。

use std::fmt;

use crate::rhi::ApiType;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, RhiError>;

/// 顶层错误类型
#[derive(Debug)]
pub enum RhiError {
    /// 配置错误
    Config(ConfigError),

    /// 上下文使用错误
    Context(ContextError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 上下文相关的错误
///
/// 由设备创建代码在发现上下文状态不一致时返回。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// 上下文尚未初始化
    NotInitialized,

    /// 调用方期望的后端与编译进来的后端不一致
    ApiMismatch { expected: ApiType, active: ApiType },

    /// 句柄已经被写入过
    HandleAlreadySet { api: ApiType, handle: &'static str },

    /// 试图写入空句柄
    NullHandle { api: ApiType, handle: &'static str },
}

impl fmt::Display for RhiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RhiError::Config(e) => write!(f, "Configuration error: {}", e),
            RhiError::Context(e) => write!(f, "Graphics context error: {}", e),
            RhiError::Io(e) => write!(f, "IO error: {}", e),
            RhiError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::NotInitialized => write!(f, "Context has not been initialized"),
            ContextError::ApiMismatch { expected, active } => {
                write!(f, "Expected {} backend but {} is active", expected, active)
            }
            ContextError::HandleAlreadySet { api, handle } => {
                write!(f, "{} {} handle has already been set", api, handle)
            }
            ContextError::NullHandle { api, handle } => {
                write!(f, "Refusing to store a null {} {} handle", api, handle)
            }
        }
    }
}

impl std::error::Error for RhiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RhiError::Config(e) => Some(e),
            RhiError::Context(e) => Some(e),
            RhiError::Io(e) => Some(e),
            RhiError::Log(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ContextError {}

impl From<std::io::Error> for RhiError {
    fn from(err: std::io::Error) -> Self {
        RhiError::Io(err)
    }
}

impl From<ConfigError> for RhiError {
    fn from(err: ConfigError) -> Self {
        RhiError::Config(err)
    }
}

impl From<ContextError> for RhiError {
    fn from(err: ContextError) -> Self {
        RhiError::Context(err)
    }
}
