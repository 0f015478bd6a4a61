//! Vulkan 后端的句柄集合与基础需求
//!
//! 初始化时只写入需求列表，实例、物理设备与逻辑设备由外部的
//! 设备创建代码在启动过程中各写入一次。
//!
//! 基础需求覆盖：
//! - 窗口表面创建（`VK_KHR_surface` + 平台表面扩展）
//! - 交换链色彩空间（`VK_EXT_swapchain_colorspace`）
//! - 交换链（`VK_KHR_swapchain`）
//! - 显存预算查询（`VK_EXT_memory_budget`）
//! - 显式同步（`VK_KHR_synchronization2`）
//!
//! 硬件能力可以在 <https://vulkan.gpuinfo.org/> 查询。

use ash::extensions::khr;
use ash::vk;
use std::ffi::{c_char, CStr};
use std::sync::OnceLock;

use super::context::store_handle;
use super::{ApiType, DiagnosticFlags};
use crate::core::error::{ContextError, Result};

/// 标准验证层
pub const KHRONOS_VALIDATION_LAYER: &CStr = c"VK_LAYER_KHRONOS_validation";

/// 平台表面扩展的候选
///
/// Linux/BSD 上同时列出 xlib 与 wayland，加载器通常只提供其中之一，
/// 创建实例前需要用 `VulkanHandles::instance_extensions_for` 按加载器实际支持的扩展过滤。
pub fn platform_surface_extensions() -> Vec<&'static CStr> {
    let mut extensions = Vec::new();

    #[cfg(target_os = "windows")]
    extensions.push(khr::Win32Surface::name());

    #[cfg(target_os = "macos")]
    extensions.push(ash::extensions::ext::MetalSurface::name());

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    {
        extensions.push(khr::XlibSurface::name());
        extensions.push(khr::WaylandSurface::name());
    }

    extensions
}

/// 实例扩展：表面、平台表面候选、交换链色彩空间
pub fn required_instance_extensions() -> Vec<&'static CStr> {
    let mut extensions = vec![khr::Surface::name()];
    extensions.extend(platform_surface_extensions());
    extensions.push(vk::ExtSwapchainColorspaceFn::name());
    extensions
}

/// 设备扩展：交换链、显存预算、synchronization2
pub fn required_device_extensions() -> Vec<&'static CStr> {
    vec![
        khr::Swapchain::name(),
        vk::ExtMemoryBudgetFn::name(),
        khr::Synchronization2::name(),
    ]
}

/// 开启验证层时附带启用的验证特性
pub fn validation_features_for(flags: &DiagnosticFlags) -> Vec<vk::ValidationFeatureEnableEXT> {
    if flags.validation {
        vec![
            vk::ValidationFeatureEnableEXT::BEST_PRACTICES,
            vk::ValidationFeatureEnableEXT::SYNCHRONIZATION_VALIDATION,
        ]
    } else {
        Vec::new()
    }
}

/// Vulkan 句柄集合
///
/// # 字段说明
///
/// - `instance` / `physical_device` / `device`：外部只写一次，未写入即为空句柄
/// - `validation_features`：创建实例时通过 `VkValidationFeaturesEXT` 启用
/// - `instance_extensions` / `validation_layers` / `device_extensions`：顺序固定的需求列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VulkanHandles {
    instance: OnceLock<vk::Instance>,
    physical_device: OnceLock<vk::PhysicalDevice>,
    device: OnceLock<vk::Device>,
    validation_features: Vec<vk::ValidationFeatureEnableEXT>,
    instance_extensions: Vec<&'static CStr>,
    validation_layers: Vec<&'static CStr>,
    device_extensions: Vec<&'static CStr>,
}

impl VulkanHandles {
    /// 空句柄加基础需求列表
    pub fn baseline(flags: &DiagnosticFlags) -> Self {
        Self {
            instance: OnceLock::new(),
            physical_device: OnceLock::new(),
            device: OnceLock::new(),
            validation_features: validation_features_for(flags),
            instance_extensions: required_instance_extensions(),
            validation_layers: vec![KHRONOS_VALIDATION_LAYER],
            device_extensions: required_device_extensions(),
        }
    }

    pub fn instance(&self) -> Option<vk::Instance> {
        self.instance.get().copied()
    }

    pub fn physical_device(&self) -> Option<vk::PhysicalDevice> {
        self.physical_device.get().copied()
    }

    pub fn device(&self) -> Option<vk::Device> {
        self.device.get().copied()
    }

    pub fn set_instance(&self, instance: vk::Instance) -> Result<()> {
        store_vk_handle(&self.instance, instance, "instance")
    }

    pub fn set_physical_device(&self, physical_device: vk::PhysicalDevice) -> Result<()> {
        store_vk_handle(&self.physical_device, physical_device, "physical device")
    }

    pub fn set_device(&self, device: vk::Device) -> Result<()> {
        store_vk_handle(&self.device, device, "device")
    }

    pub fn validation_features(&self) -> &[vk::ValidationFeatureEnableEXT] {
        &self.validation_features
    }

    pub fn instance_extensions(&self) -> &[&'static CStr] {
        &self.instance_extensions
    }

    pub fn validation_layers(&self) -> &[&'static CStr] {
        &self.validation_layers
    }

    pub fn device_extensions(&self) -> &[&'static CStr] {
        &self.device_extensions
    }

    /// 创建实例时实际要启用的层，验证关闭时为空
    pub fn enabled_layers(&self, flags: &DiagnosticFlags) -> &[&'static CStr] {
        if flags.validation {
            &self.validation_layers
        } else {
            &[]
        }
    }

    /// 按加载器支持的扩展过滤平台表面候选，其余需求原样保留
    ///
    /// `available` 通常来自 `vkEnumerateInstanceExtensionProperties`。
    /// 非平台表面的需求即使不在其中也会保留，由实例创建报错。
    pub fn instance_extensions_for(&self, available: &[&CStr]) -> Vec<&'static CStr> {
        let platform = platform_surface_extensions();
        self.instance_extensions
            .iter()
            .copied()
            .filter(|name| !platform.contains(name) || available.contains(name))
            .collect()
    }

    /// 供 `vk::InstanceCreateInfo::enabled_extension_names` 使用，未过滤平台表面候选
    pub fn instance_extension_ptrs(&self) -> Vec<*const c_char> {
        as_ptrs(&self.instance_extensions)
    }

    /// 过滤后的实例扩展指针
    pub fn instance_extension_ptrs_for(&self, available: &[&CStr]) -> Vec<*const c_char> {
        as_ptrs(&self.instance_extensions_for(available))
    }

    /// 供 `vk::InstanceCreateInfo::enabled_layer_names` 使用
    pub fn enabled_layer_ptrs(&self, flags: &DiagnosticFlags) -> Vec<*const c_char> {
        as_ptrs(self.enabled_layers(flags))
    }

    /// 供 `vk::DeviceCreateInfo::enabled_extension_names` 使用
    pub fn device_extension_ptrs(&self) -> Vec<*const c_char> {
        as_ptrs(&self.device_extensions)
    }
}

fn as_ptrs(names: &[&'static CStr]) -> Vec<*const c_char> {
    names.iter().map(|name| name.as_ptr()).collect()
}

fn store_vk_handle<T: vk::Handle + Copy>(slot: &OnceLock<T>, value: T, handle: &'static str) -> Result<()> {
    if value.as_raw() == 0 {
        return Err(ContextError::NullHandle { api: ApiType::Vulkan, handle }.into());
    }
    store_handle(slot, value, ApiType::Vulkan, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RhiError;
    use crate::rhi::BuildProfile;
    use ash::vk::Handle;

    fn names(list: &[&'static CStr]) -> Vec<String> {
        list.iter().map(|n| n.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_baseline_lists() {
        let handles = VulkanHandles::baseline(&DiagnosticFlags::for_profile(BuildProfile::Release));

        let instance = names(handles.instance_extensions());
        assert!(instance.len() >= 3);
        assert_eq!(instance.first().map(String::as_str), Some("VK_KHR_surface"));
        assert!(instance.contains(&"VK_EXT_swapchain_colorspace".to_string()));

        assert_eq!(names(handles.validation_layers()), vec!["VK_LAYER_KHRONOS_validation"]);

        assert_eq!(
            names(handles.device_extensions()),
            vec!["VK_KHR_swapchain", "VK_EXT_memory_budget", "VK_KHR_synchronization2"]
        );
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_surface_extension() {
        assert_eq!(
            names(&required_instance_extensions()),
            vec!["VK_KHR_surface", "VK_KHR_win32_surface", "VK_EXT_swapchain_colorspace"]
        );
    }

    #[test]
    fn test_platform_surfaces_filtered_by_loader() {
        let handles = VulkanHandles::baseline(&DiagnosticFlags::default());
        let platform = platform_surface_extensions();

        // 加载器支持全部扩展时不做任何删减
        let everything = handles.instance_extensions().to_vec();
        assert_eq!(handles.instance_extensions_for(&everything), everything);

        if let Some(missing) = platform.first().copied() {
            let available: Vec<&CStr> = everything.iter().copied().filter(|n| *n != missing).collect();
            let filtered = handles.instance_extensions_for(&available);
            assert!(!filtered.contains(&missing));
            assert_eq!(filtered.len(), everything.len() - 1);
        }

        // 非平台表面的需求始终保留
        let filtered = handles.instance_extensions_for(&[]);
        assert_eq!(
            names(&filtered),
            vec!["VK_KHR_surface", "VK_EXT_swapchain_colorspace"]
        );
        assert_eq!(handles.instance_extension_ptrs_for(&[]).len(), 2);
    }

    #[test]
    fn test_handles_start_null() {
        let handles = VulkanHandles::baseline(&DiagnosticFlags::default());
        assert_eq!(handles.instance(), None);
        assert_eq!(handles.physical_device(), None);
        assert_eq!(handles.device(), None);
    }

    #[test]
    fn test_validation_features_follow_profile() {
        let debug = VulkanHandles::baseline(&DiagnosticFlags::for_profile(BuildProfile::Debug));
        assert_eq!(
            debug.validation_features(),
            &[
                vk::ValidationFeatureEnableEXT::BEST_PRACTICES,
                vk::ValidationFeatureEnableEXT::SYNCHRONIZATION_VALIDATION,
            ]
        );

        let release = VulkanHandles::baseline(&DiagnosticFlags::for_profile(BuildProfile::Release));
        assert!(release.validation_features().is_empty());
    }

    #[test]
    fn test_enabled_layers() {
        let debug_flags = DiagnosticFlags::for_profile(BuildProfile::Debug);
        let release_flags = DiagnosticFlags::for_profile(BuildProfile::Release);
        let handles = VulkanHandles::baseline(&debug_flags);

        assert_eq!(handles.enabled_layers(&debug_flags), &[KHRONOS_VALIDATION_LAYER]);
        assert!(handles.enabled_layers(&release_flags).is_empty());
        assert!(handles.enabled_layer_ptrs(&release_flags).is_empty());
    }

    #[test]
    fn test_extension_ptrs_match_names() {
        let handles = VulkanHandles::baseline(&DiagnosticFlags::default());
        let ptrs = handles.device_extension_ptrs();
        assert_eq!(ptrs.len(), handles.device_extensions().len());
        for (ptr, name) in ptrs.iter().zip(handles.device_extensions()) {
            let read_back = unsafe { CStr::from_ptr(*ptr) };
            assert_eq!(read_back, *name);
        }
        assert_eq!(handles.instance_extension_ptrs().len(), handles.instance_extensions().len());
    }

    #[test]
    fn test_handle_written_once() {
        let handles = VulkanHandles::baseline(&DiagnosticFlags::default());
        let instance = vk::Instance::from_raw(0x1000);

        handles.set_instance(instance).unwrap();
        assert_eq!(handles.instance(), Some(instance));

        let err = handles.set_instance(vk::Instance::from_raw(0x2000)).unwrap_err();
        assert!(matches!(
            err,
            RhiError::Context(ContextError::HandleAlreadySet { api: ApiType::Vulkan, handle: "instance" })
        ));
        assert_eq!(handles.instance(), Some(instance));
    }

    #[test]
    fn test_null_handle_rejected() {
        let handles = VulkanHandles::baseline(&DiagnosticFlags::default());
        let err = handles.set_device(vk::Device::null()).unwrap_err();
        assert!(matches!(
            err,
            RhiError::Context(ContextError::NullHandle { handle: "device", .. })
        ));
        assert_eq!(handles.device(), None);

        handles.set_physical_device(vk::PhysicalDevice::from_raw(0x42)).unwrap();
        assert_eq!(handles.physical_device().map(|p| p.as_raw()), Some(0x42));
    }
}
