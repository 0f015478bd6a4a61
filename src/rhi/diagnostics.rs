//! 构建配置相关的诊断开关
//!
//! 开关只由构建配置（Debug / Release）决定，运行时输入无法修改。
//! 映射写成纯函数，两种配置可以在同一个测试二进制里验证。

/// 构建配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    /// 当前二进制的构建配置，对应 `debug_assertions`
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildProfile::Debug
        } else {
            BuildProfile::Release
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildProfile::Debug => "debug",
            BuildProfile::Release => "release",
        }
    }
}

/// 诊断开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DiagnosticFlags {
    /// 图形 API 验证层
    pub validation: bool,
    /// GPU 调试标记
    pub gpu_markers: bool,
    /// GPU 性能分析
    pub gpu_profiling: bool,
    /// 外部图形调试器（RenderDoc 等）挂载
    pub external_debugger: bool,
}

impl DiagnosticFlags {
    /// 根据构建配置生成诊断开关
    ///
    /// Release 下性能分析仍然开启，验证层和 GPU 标记关闭。
    pub const fn for_profile(profile: BuildProfile) -> Self {
        match profile {
            BuildProfile::Debug => Self {
                validation: true,
                gpu_markers: true,
                gpu_profiling: true,
                external_debugger: false,
            },
            BuildProfile::Release => Self {
                validation: false,
                gpu_markers: false,
                gpu_profiling: true,
                external_debugger: false,
            },
        }
    }
}
