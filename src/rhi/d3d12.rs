//! Direct3D 12 后端的句柄集合

use std::sync::OnceLock;
use windows::Win32::Graphics::Direct3D12::ID3D12Device;

use super::context::store_handle;
use super::ApiType;
use crate::core::error::Result;

/// Direct3D 12 句柄集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct D3d12Handles {
    device: OnceLock<ID3D12Device>,
}

// DirectX 12 的设备对象是线程安全的
unsafe impl Send for D3d12Handles {}
unsafe impl Sync for D3d12Handles {}

impl D3d12Handles {
    pub fn device(&self) -> Option<ID3D12Device> {
        self.device.get().cloned()
    }

    pub fn set_device(&self, device: ID3D12Device) -> Result<()> {
        store_handle(&self.device, device, ApiType::D3d12, "device")
    }
}
