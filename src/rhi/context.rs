//! 图形上下文
//!
//! `GraphicsContext` 描述"当前使用哪个图形 API、它的基础需求和诊断开关"，
//! 其他子系统据此分支，而不需要各自写后端相关的条件编译。
//!
//! # 生命周期
//!
//! 1. `GraphicsContext::new()` 创建未初始化的上下文
//! 2. 启动阶段调用一次 `initialize()`（需要 `&mut self`，只有一个写入者）
//! 3. `into_shared()` 之后通过 `Arc` 共享，设备创建代码经由
//!    `vulkan()` / `d3d11()` / `d3d12()` 把句柄各写入一次
//! 4. 渲染和资源线程只读
//!
//! 上下文不销毁任何句柄，句柄的释放由拥有它们的后端子系统负责。

use std::sync::{Arc, OnceLock};

use super::{ApiType, BuildProfile, DiagnosticFlags};
use crate::core::error::{ContextError, Result};
use crate::{rhi_debug, rhi_info, rhi_warn};

#[cfg(feature = "d3d11")]
use super::d3d11::D3d11Handles;
#[cfg(feature = "d3d12")]
use super::d3d12::D3d12Handles;
#[cfg(feature = "vulkan")]
use super::vulkan::VulkanHandles;

/// 后端句柄集合
///
/// 只有编译期选定的后端变体存在。
#[derive(Debug, Clone, PartialEq)]
pub enum BackendHandles {
    #[cfg(feature = "d3d11")]
    D3d11(D3d11Handles),
    #[cfg(feature = "d3d12")]
    D3d12(D3d12Handles),
    #[cfg(feature = "vulkan")]
    Vulkan(VulkanHandles),
}

impl BackendHandles {
    /// 编译进来的后端的初始句柄集合：句柄全空，Vulkan 附带基础需求列表
    #[cfg_attr(not(feature = "vulkan"), allow(unused_variables))]
    pub fn baseline(flags: &DiagnosticFlags) -> Self {
        #[cfg(feature = "d3d11")]
        let handles = BackendHandles::D3d11(D3d11Handles::default());
        #[cfg(feature = "d3d12")]
        let handles = BackendHandles::D3d12(D3d12Handles::default());
        #[cfg(feature = "vulkan")]
        let handles = BackendHandles::Vulkan(VulkanHandles::baseline(flags));
        handles
    }

    pub fn api_type(&self) -> ApiType {
        match self {
            #[cfg(feature = "d3d11")]
            BackendHandles::D3d11(_) => ApiType::D3d11,
            #[cfg(feature = "d3d12")]
            BackendHandles::D3d12(_) => ApiType::D3d12,
            #[cfg(feature = "vulkan")]
            BackendHandles::Vulkan(_) => ApiType::Vulkan,
        }
    }
}

/// 图形上下文
///
/// 初始化前 `api_type` 为 `Undefined`、描述字符串为空、没有句柄集合，
/// 这是唯一合法的未就绪状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicsContext {
    api_type: ApiType,
    api_type_str: &'static str,
    api_version_str: &'static str,
    handles: Option<BackendHandles>,
    diagnostics: DiagnosticFlags,
}

impl GraphicsContext {
    /// 创建未初始化的上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建并立即初始化
    pub fn initialized(profile: BuildProfile) -> Self {
        let mut context = Self::new();
        context.initialize(profile);
        context
    }

    /// 初始化上下文
    ///
    /// 写入编译期选定后端的类型与描述、重置该后端全部句柄、
    /// 按构建配置设置诊断开关。不会失败，重复调用得到相同的状态。
    ///
    /// # 示例
    ///
    /// ```
    /// use rhi_context::rhi::{BuildProfile, GraphicsContext, ACTIVE_API};
    ///
    /// let mut context = GraphicsContext::new();
    /// assert!(!context.is_initialized());
    ///
    /// context.initialize(BuildProfile::current());
    /// assert!(context.is_initialized());
    /// assert_eq!(context.api_type_str(), ACTIVE_API.as_str());
    /// ```
    pub fn initialize(&mut self, profile: BuildProfile) {
        if self.is_initialized() {
            rhi_warn!(api = self.api_type_str, "Graphics context initialized again, backend handles reset");
        }

        let diagnostics = DiagnosticFlags::for_profile(profile);
        let handles = BackendHandles::baseline(&diagnostics);

        self.api_type = handles.api_type();
        self.api_type_str = self.api_type.as_str();
        self.api_version_str = self.api_type.min_version();
        self.handles = Some(handles);
        self.diagnostics = diagnostics;

        rhi_info!(
            api = self.api_type_str,
            version = self.api_version_str,
            profile = profile.name(),
            validation = diagnostics.validation,
            gpu_markers = diagnostics.gpu_markers,
            gpu_profiling = diagnostics.gpu_profiling,
            external_debugger = diagnostics.external_debugger,
            "Graphics context initialized"
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.api_type != ApiType::Undefined
    }

    /// 转为共享所有权，之后只能通过 `&self` 写入句柄
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 设备创建代码在写入句柄前调用，状态不一致时返回错误
    pub fn ensure_ready(&self, expected: ApiType) -> Result<()> {
        if !self.is_initialized() {
            return Err(ContextError::NotInitialized.into());
        }
        if expected != self.api_type {
            return Err(ContextError::ApiMismatch {
                expected,
                active: self.api_type,
            }.into());
        }
        Ok(())
    }

    pub fn api_type(&self) -> ApiType {
        self.api_type
    }

    pub fn api_type_str(&self) -> &'static str {
        self.api_type_str
    }

    pub fn api_version_str(&self) -> &'static str {
        self.api_version_str
    }

    pub fn diagnostics(&self) -> &DiagnosticFlags {
        &self.diagnostics
    }

    pub fn handles(&self) -> Option<&BackendHandles> {
        self.handles.as_ref()
    }

    #[cfg(feature = "vulkan")]
    pub fn vulkan(&self) -> Option<&VulkanHandles> {
        match &self.handles {
            Some(BackendHandles::Vulkan(handles)) => Some(handles),
            _ => None,
        }
    }

    #[cfg(feature = "d3d11")]
    pub fn d3d11(&self) -> Option<&D3d11Handles> {
        match &self.handles {
            Some(BackendHandles::D3d11(handles)) => Some(handles),
            _ => None,
        }
    }

    #[cfg(feature = "d3d12")]
    pub fn d3d12(&self) -> Option<&D3d12Handles> {
        match &self.handles {
            Some(BackendHandles::D3d12(handles)) => Some(handles),
            _ => None,
        }
    }
}

/// 写入只允许一次的句柄槽位
pub(crate) fn store_handle<T>(slot: &OnceLock<T>, value: T, api: ApiType, handle: &'static str) -> Result<()> {
    slot.set(value)
        .map_err(|_| ContextError::HandleAlreadySet { api, handle })?;
    rhi_debug!(api = %api, handle, "Backend handle stored");
    Ok(())
}
