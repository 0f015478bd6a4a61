//! 配置管理模块
//!
//! 提供运行时配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! 图形后端与诊断开关都在编译期决定，配置文件不能改变它们。
//! `graphics.backend` 只是一个期望值，用来在启动时确认二进制
//! 确实编译了所需的后端。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [graphics]
//! backend = "vulkan"  # 或 "d3d11" / "d3d12"，省略则接受编译进来的后端
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = true
//! log_file = "rhi.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result, RhiError};
use crate::rhi::{ApiType, ACTIVE_API};

/// 运行时配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 图形配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 期望的图形后端
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<ApiType>,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "rhi.log".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl LogLevel {
    /// 从字符串解析日志级别（大小写不敏感）
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use rhi_context::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), rhi_context::core::RhiError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RhiError::from(ConfigError::FileNotFound(path_str.clone())),
            _ => RhiError::from(e),
        })?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，文件不存在时使用默认配置
    ///
    /// 文件存在但无法读取或解析时返回错误。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::from_file(path) {
            Err(RhiError::Config(ConfigError::FileNotFound(_))) => Ok(Self::default()),
            other => other,
        }
    }

    /// 启动时要求的后端，未配置时就是编译进来的后端
    pub fn expected_backend(&self) -> ApiType {
        self.graphics.backend.unwrap_or(ACTIVE_API)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--vulkan` / `--d3d11` / `--d3d12`: 期望的图形后端
    /// - `--backend <name>`: 同上，名称大小写不敏感，无法识别时忽略
    /// - `--log-level <level>`: 日志级别
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        for (flag, api) in [
            ("--vulkan", ApiType::Vulkan),
            ("--d3d11", ApiType::D3d11),
            ("--d3d12", ApiType::D3d12),
        ] {
            if args.iter().any(|a| a == flag) {
                self.graphics.backend = Some(api);
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--backend") {
            if let Some(api) = args.get(idx + 1).and_then(|s| s.parse::<ApiType>().ok()) {
                self.graphics.backend = Some(api);
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-level") {
            if let Some(level) = args.get(idx + 1).and_then(|s| LogLevel::parse(s)) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        match self.graphics.backend {
            Some(ApiType::Undefined) => {
                return Err(ConfigError::InvalidValue {
                    field: "graphics.backend".to_string(),
                    reason: "Backend must be one of vulkan, d3d11, d3d12".to_string(),
                }.into());
            }
            Some(requested) if requested != ACTIVE_API => {
                return Err(ConfigError::InvalidValue {
                    field: "graphics.backend".to_string(),
                    reason: format!(
                        "{} was requested but this build only contains the {} backend",
                        requested, ACTIVE_API
                    ),
                }.into());
            }
            _ => {}
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file output is enabled".to_string(),
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.graphics.backend, None);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(!config.logging.file_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::from_toml_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.log_file, "rhi.log");
        assert_eq!(config.graphics.backend, None);
    }

    #[test]
    fn test_parse_backend() {
        let config = Config::from_toml_str("[graphics]\nbackend = \"d3d12\"\n").unwrap();
        assert_eq!(config.graphics.backend, Some(ApiType::D3d12));

        assert!(Config::from_toml_str("[graphics]\nbackend = \"metal\"\n").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.graphics.backend = Some(ACTIVE_API);
        assert!(config.validate().is_ok());

        config.graphics.backend = Some(ApiType::Undefined);
        assert!(config.validate().is_err());

        let other = [ApiType::Vulkan, ApiType::D3d11, ApiType::D3d12]
            .into_iter()
            .find(|api| *api != ACTIVE_API)
            .unwrap();
        config.graphics.backend = Some(other);
        assert!(config.validate().is_err());

        config.graphics.backend = None;
        config.logging.file_output = true;
        config.logging.log_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["rhi_context", "--d3d11", "--log-level", "WARN"]);
        assert_eq!(config.graphics.backend, Some(ApiType::D3d11));
        assert_eq!(config.logging.level, LogLevel::Warn);

        config.apply_args(["rhi_context", "--log-level", "loud"]);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("rhi_context_config_{}.toml", std::process::id()));
        let mut config = Config::default();
        config.graphics.backend = Some(ApiType::Vulkan);
        config.logging.level = LogLevel::Trace;
        config.save_to_file(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = Config::from_file_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("rhi_context_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "[graphics]\nbackend = \"d3d13\"\n").unwrap();

        let result = Config::from_file_or_default(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RhiError::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_backend_arg() {
        let mut config = Config::default();
        config.apply_args(["rhi_context", "--backend", "D3D12"]);
        assert_eq!(config.graphics.backend, Some(ApiType::D3d12));

        config.apply_args(["rhi_context", "--backend", "glide"]);
        assert_eq!(config.graphics.backend, Some(ApiType::D3d12));
    }

    #[test]
    fn test_expected_backend() {
        let mut config = Config::default();
        assert_eq!(config.expected_backend(), ACTIVE_API);

        config.graphics.backend = Some(ApiType::D3d11);
        assert_eq!(config.expected_backend(), ApiType::D3d11);
    }
}
