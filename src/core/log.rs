//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 使用示例
//!
//! ```no_run
//! use rhi_context::core::log;
//! use rhi_context::core::config::LogLevel;
//!
//! log::init_logger(LogLevel::Info, false, None)?;
//! tracing::info!(api = "Vulkan", "Graphics context initialized");
//! # Ok::<(), rhi_context::core::RhiError>(())
//! ```

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use std::path::Path;

use super::config::LogLevel;
use super::error::{Result, RhiError};

/// 初始化日志系统
///
/// 每个进程只能成功调用一次，重复调用返回 `RhiError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "rhi.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = EnvFilter::new(filter_directive(level));

    let result = if file_output {
        // 解析日志文件路径
        let log_path = log_file_path.unwrap_or("rhi.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("rhi.log");

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };

    result.map_err(|e| RhiError::Log(e.to_string()))
}

fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

/// 图形上下文日志 - Info 级别
#[macro_export]
macro_rules! rhi_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "rhi_context::rhi", $($arg)*)
    };
}

/// 图形上下文日志 - Warn 级别
#[macro_export]
macro_rules! rhi_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "rhi_context::rhi", $($arg)*)
    };
}

/// 图形上下文日志 - Debug 级别
#[macro_export]
macro_rules! rhi_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "rhi_context::rhi", $($arg)*)
    };
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}
