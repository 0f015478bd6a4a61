//! Direct3D 11 后端的句柄集合
//!
//! 设备、立即上下文和调试标注接口都由外部设备创建代码写入一次。

use std::sync::OnceLock;
use windows::Win32::Graphics::Direct3D11::{
    ID3D11Device5, ID3D11DeviceContext4, ID3DUserDefinedAnnotation,
};

use super::context::store_handle;
use super::ApiType;
use crate::core::error::Result;

/// Direct3D 11 句柄集合
///
/// 未写入的槽位即为空句柄。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct D3d11Handles {
    device: OnceLock<ID3D11Device5>,
    device_context: OnceLock<ID3D11DeviceContext4>,
    annotation: OnceLock<ID3DUserDefinedAnnotation>,
}

// 句柄在启动阶段写入一次，之后只读；立即上下文的调用由使用方串行化
unsafe impl Send for D3d11Handles {}
unsafe impl Sync for D3d11Handles {}

impl D3d11Handles {
    pub fn device(&self) -> Option<ID3D11Device5> {
        self.device.get().cloned()
    }

    pub fn device_context(&self) -> Option<ID3D11DeviceContext4> {
        self.device_context.get().cloned()
    }

    /// GPU 标记使用的调试标注接口
    pub fn annotation(&self) -> Option<ID3DUserDefinedAnnotation> {
        self.annotation.get().cloned()
    }

    pub fn set_device(&self, device: ID3D11Device5) -> Result<()> {
        store_handle(&self.device, device, ApiType::D3d11, "device")
    }

    pub fn set_device_context(&self, device_context: ID3D11DeviceContext4) -> Result<()> {
        store_handle(&self.device_context, device_context, ApiType::D3d11, "device context")
    }

    pub fn set_annotation(&self, annotation: ID3DUserDefinedAnnotation) -> Result<()> {
        store_handle(&self.annotation, annotation, ApiType::D3d11, "annotation")
    }
}
