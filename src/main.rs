//! rhi_context - 图形上下文启动报告
//!
//! 模拟引擎启动序列的前半段：加载配置、初始化日志、初始化图形上下文，
//! 然后输出编译进来的后端、基础需求和诊断开关。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --vulkan --log-level debug
//! ```

use anyhow::Context as _;
use rhi_context::core::{log, Config};
use rhi_context::rhi::{BuildProfile, GraphicsContext};
use tracing::info;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml），不存在时使用默认配置，无法解析时退出
/// 2. 应用命令行参数覆盖
/// 3. 验证配置（期望的后端必须是编译进来的后端）
/// 4. 初始化日志系统
/// 5. 创建并初始化图形上下文，转为共享所有权
/// 6. 输出启动报告
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml")
        .context("failed to load config.toml")?;

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    config.validate().context("invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = config.logging.file_output.then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("failed to initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "rhi_context starting...");

    // 5. 初始化图形上下文（必须先于任何后端对象的创建）
    let profile = BuildProfile::current();
    let context = GraphicsContext::initialized(profile).into_shared();
    context
        .ensure_ready(config.expected_backend())
        .context("graphics context is not ready")?;

    // 6. 启动报告
    let diagnostics = context.diagnostics();
    info!(
        api = context.api_type_str(),
        min_version = context.api_version_str(),
        profile = profile.name(),
        "Graphics backend"
    );
    info!(
        validation = diagnostics.validation,
        gpu_markers = diagnostics.gpu_markers,
        gpu_profiling = diagnostics.gpu_profiling,
        external_debugger = diagnostics.external_debugger,
        "Diagnostics"
    );

    #[cfg(feature = "vulkan")]
    if let Some(vulkan) = context.vulkan() {
        info!(extensions = ?vulkan.instance_extensions(), "Vulkan instance extensions");
        info!(layers = ?vulkan.enabled_layers(diagnostics), "Vulkan layers");
        info!(extensions = ?vulkan.device_extensions(), "Vulkan device extensions");
        info!(features = ?vulkan.validation_features(), "Vulkan validation features");
    }

    info!("Graphics context ready, handing over to device creation");
    Ok(())
}
